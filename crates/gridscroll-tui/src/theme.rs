use ratatui::style::Color;

/// Colors of the demo table
#[derive(Debug, Clone)]
pub struct Theme {
    // Background colors
    pub bg0: Color,
    pub bg1: Color,
    pub bg2: Color,

    // Foreground colors
    pub fg0: Color,
    pub grey2: Color,

    // Table colors
    pub header: Color,
    pub sticky: Color,
    pub thumb: Color,
    pub track: Color,
    pub warning: Color,
}

impl Default for Theme {
    fn default() -> Self {
        // Gruvbox Dark
        Self {
            bg0: Color::Rgb(0x28, 0x28, 0x28),
            bg1: Color::Rgb(0x32, 0x30, 0x2f),
            bg2: Color::Rgb(0x45, 0x40, 0x3d),
            fg0: Color::Rgb(0xd4, 0xbe, 0x98),
            grey2: Color::Rgb(0xa8, 0x99, 0x84),
            header: Color::Rgb(0xd8, 0xa6, 0x57),
            sticky: Color::Rgb(0x7d, 0xae, 0xa3),
            thumb: Color::Rgb(0x89, 0xb4, 0x82),
            track: Color::Rgb(0x50, 0x49, 0x45),
            warning: Color::Rgb(0xe7, 0x8a, 0x4e),
        }
    }
}
