use ratatui::style::Color;

use ir_weather_core::WeatherIcon;

pub const BACKGROUND: Color = Color::Rgb(0x1e, 0x2a, 0x3a);
pub const TITLE_TEXT: Color = Color::Rgb(0xff, 0xff, 0xff);
pub const BODY_TEXT: Color = Color::Rgb(0xf0, 0xf0, 0xf0);
pub const MAP_MARKER: Color = Color::Rgb(0x99, 0x00, 0x00);
pub const CREDIT_BOX: Color = Color::Rgb(0x00, 0x00, 0x00);
pub const CREDIT_TEXT: Color = Color::Rgb(0xcc, 0xcc, 0xcc);
pub const BORDER: Color = Color::Rgb(0x40, 0x40, 0x40);
pub const POPUP_BORDER: Color = Color::Rgb(0xe5, 0xe5, 0xe5);
pub const STATUS_PROGRESS: Color = Color::Rgb(0x9c, 0xa3, 0xaf);
pub const STATUS_ERROR: Color = Color::Rgb(0xef, 0x44, 0x44);

pub fn icon_color(icon: WeatherIcon) -> Color {
    let (r, g, b) = icon.rgb();
    Color::Rgb(r, g, b)
}
