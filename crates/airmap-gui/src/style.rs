use iced::widget::{button, container};
use iced::{Background, Border, Color, Shadow, Theme};

pub mod palette {
    use iced::Color;

    pub const BACKGROUND: Color = Color::from_rgb(0.12, 0.12, 0.12); // #1e1e1e
    pub const SURFACE: Color = Color::from_rgb(0.18, 0.18, 0.18); // #2d2d2d
    pub const ACCENT_BLUE: Color = Color::from_rgb(0.23, 0.51, 0.96); // #3b82f6
    pub const TEXT_PRIMARY: Color = Color::from_rgb(0.9, 0.9, 0.9);
    pub const TEXT_SECONDARY: Color = Color::from_rgb(0.6, 0.6, 0.6);
    pub const BORDER: Color = Color::from_rgb(0.25, 0.25, 0.25);
    pub const ERROR: Color = Color::from_rgb(1.0, 0.3, 0.3);

    // Map
    pub const OCEAN: Color = Color::from_rgb(0.07, 0.09, 0.12);
    pub const LAND_EDGE: Color = Color::from_rgb(0.45, 0.5, 0.55);
    pub const LAND_HIGHLIGHT: Color = Color::from_rgba(0.23, 0.51, 0.96, 0.18);
    pub const GRATICULE: Color = Color::from_rgba(1.0, 1.0, 1.0, 0.06);
    pub const MARKER: Color = Color::from_rgb(1.0, 0.0, 0.0); // #F00
    pub const MARKER_ACTIVE: Color = Color::from_rgb(1.0, 1.0, 0.0);
    pub const TOOLTIP_BG: Color = Color::from_rgba(0.0, 0.0, 0.0, 0.85);
}

pub fn container_main_content(_theme: &Theme) -> container::Style {
    container::Style {
        background: Some(Background::Color(palette::BACKGROUND)),
        ..Default::default()
    }
}

pub fn container_card(_theme: &Theme) -> container::Style {
    container::Style {
        background: Some(Background::Color(palette::SURFACE)),
        border: Border {
            color: palette::BORDER,
            width: 1.0,
            radius: 8.0.into(),
        },
        shadow: Shadow {
            color: Color::from_rgba(0.0, 0.0, 0.0, 0.5),
            offset: iced::Vector::new(0.0, 4.0),
            blur_radius: 12.0,
        },
        ..Default::default()
    }
}

pub fn container_backdrop(_theme: &Theme) -> container::Style {
    container::Style {
        background: Some(Background::Color(Color::from_rgba(0.0, 0.0, 0.0, 0.7))),
        ..Default::default()
    }
}

// Button Styles
pub fn button_primary(_theme: &Theme, status: button::Status) -> button::Style {
    let base = button::Style {
        background: Some(Background::Color(palette::ACCENT_BLUE)),
        text_color: Color::WHITE,
        border: Border {
            radius: 6.0.into(),
            ..Default::default()
        },
        shadow: Shadow {
            color: Color::from_rgba(0.23, 0.51, 0.96, 0.4),
            offset: iced::Vector::new(0.0, 2.0),
            blur_radius: 8.0,
        },
    };

    match status {
        button::Status::Hovered => button::Style {
            background: Some(Background::Color(Color::from_rgb(0.3, 0.6, 1.0))),
            shadow: Shadow {
                color: Color::from_rgba(0.23, 0.51, 0.96, 0.6),
                offset: iced::Vector::new(0.0, 4.0),
                blur_radius: 12.0,
            },
            ..base
        },
        _ => base,
    }
}

/// Country selector; the selected one keeps the accent border.
pub fn button_country(selected: bool) -> impl Fn(&Theme, button::Status) -> button::Style {
    move |_theme, status| {
        let base = button::Style {
            background: Some(Background::Color(palette::SURFACE)),
            text_color: palette::TEXT_PRIMARY,
            border: Border {
                color: palette::BORDER,
                width: 1.0,
                radius: 6.0.into(),
            },
            shadow: Shadow::default(),
        };

        let accent = Border {
            color: palette::ACCENT_BLUE,
            width: 1.0,
            radius: 6.0.into(),
        };

        match (selected, status) {
            (true, _) => button::Style {
                background: Some(Background::Color(Color::from_rgba(0.23, 0.51, 0.96, 0.25))),
                text_color: Color::WHITE,
                border: accent,
                ..base
            },
            (false, button::Status::Hovered) => button::Style {
                border: accent,
                shadow: Shadow {
                    color: Color::from_rgba(0.23, 0.51, 0.96, 0.2),
                    offset: iced::Vector::new(0.0, 4.0),
                    blur_radius: 12.0,
                },
                ..base
            },
            _ => base,
        }
    }
}
