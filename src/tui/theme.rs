use ratatui::style::Color;

// Icon tile colors, cycled by position
pub const TILE_CORAL: Color = Color::Rgb(232, 131, 136);      // #E88388
pub const TILE_GOLD: Color = Color::Rgb(219, 171, 121);       // #DBAB79
pub const TILE_LIGHT_BLUE: Color = Color::Rgb(124, 175, 194); // #7CAFC2
pub const TILE_MINT: Color = Color::Rgb(161, 193, 129);       // #A1C181

pub const TILE_COLORS: [Color; 4] = [TILE_CORAL, TILE_GOLD, TILE_LIGHT_BLUE, TILE_MINT];

// UI colors
pub const TEXT_DIM: Color = Color::Rgb(136, 136, 136);        // #888888
pub const TEXT_WHITE: Color = Color::Rgb(255, 255, 255);      // #FFFFFF
pub const FLING_GREEN: Color = Color::Rgb(134, 179, 69);      // Active fling indicator
