use ratatui::style::Color;

use crate::cli::ThemeArg;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorCapability {
    TrueColor,
    Xterm256,
    Basic16,
}

#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub surface: Color,
    pub popup_surface: Color,
    pub accent: Color,
    pub text: Color,
    pub muted_text: Color,
    pub popup_text: Color,
    pub border: Color,
    pub popup_border: Color,
    pub grid_minor: Color,
    pub grid_major: Color,
    pub line: Color,
    pub marker: Color,
    pub highlight: Color,
    pub info: Color,
    pub warning: Color,
}

type Rgb = (u8, u8, u8);

struct Seeds {
    surface: Rgb,
    accent: Rgb,
    line: Rgb,
    marker: Rgb,
}

pub fn detect_color_capability() -> ColorCapability {
    detect_color_capability_from(
        std::env::var("TERM").ok().as_deref(),
        std::env::var("COLORTERM").ok().as_deref(),
        std::env::var("NO_COLOR").ok().as_deref(),
    )
}

pub(crate) fn detect_color_capability_from(
    term: Option<&str>,
    colorterm: Option<&str>,
    no_color: Option<&str>,
) -> ColorCapability {
    if no_color.is_some_and(|value| !value.is_empty())
        || term.is_some_and(|value| value.eq_ignore_ascii_case("dumb"))
    {
        return ColorCapability::Basic16;
    }
    let colorterm = colorterm.unwrap_or_default().to_lowercase();
    let term = term.unwrap_or_default().to_lowercase();
    if [colorterm.as_str(), term.as_str()]
        .iter()
        .any(|value| value.contains("truecolor") || value.contains("24bit"))
    {
        return ColorCapability::TrueColor;
    }
    if term.contains("256color") {
        ColorCapability::Xterm256
    } else {
        ColorCapability::Basic16
    }
}

pub fn theme_for(mode: ThemeArg, capability: ColorCapability) -> Theme {
    let seeds = match mode {
        ThemeArg::Auto | ThemeArg::Rose => Seeds {
            surface: (32, 22, 34),
            accent: (244, 143, 177),
            line: (236, 112, 150),
            marker: (255, 205, 222),
        },
        ThemeArg::Nord => Seeds {
            surface: (46, 52, 64),
            accent: (136, 192, 208),
            line: (129, 161, 193),
            marker: (235, 203, 139),
        },
        ThemeArg::Mono => Seeds {
            surface: (24, 24, 24),
            accent: (210, 210, 210),
            line: (180, 180, 180),
            marker: (245, 245, 245),
        },
        ThemeArg::HighContrast => Seeds {
            surface: (0, 0, 0),
            accent: (255, 255, 0),
            line: (0, 255, 255),
            marker: (255, 255, 255),
        },
    };

    let surface = seeds.surface;
    let popup_surface = mix_rgb(surface, (0, 0, 0), 0.35);
    let text = ensure_contrast((236, 236, 240), surface, 7.0);
    let muted_text = ensure_contrast(mix_rgb(text, surface, 0.40), surface, 4.5);
    let popup_text = ensure_contrast(text, popup_surface, 7.0);
    let accent = ensure_contrast(seeds.accent, surface, 4.5);
    let border = mix_rgb(seeds.accent, surface, 0.45);
    let popup_border = ensure_contrast(seeds.accent, popup_surface, 3.0);
    let grid_minor = mix_rgb(text, surface, 0.80);
    let grid_major = mix_rgb(text, surface, 0.55);
    let line = ensure_contrast(seeds.line, surface, 3.0);
    let marker = ensure_contrast(seeds.marker, surface, 4.5);
    let highlight = ensure_contrast(mix_rgb(seeds.accent, (255, 255, 255), 0.35), surface, 4.5);

    let q = |rgb: Rgb| quantize(Color::Rgb(rgb.0, rgb.1, rgb.2), capability);
    Theme {
        surface: q(surface),
        popup_surface: q(popup_surface),
        accent: q(accent),
        text: q(text),
        muted_text: q(muted_text),
        popup_text: q(popup_text),
        border: q(border),
        popup_border: q(popup_border),
        grid_minor: q(grid_minor),
        grid_major: q(grid_major),
        line: q(line),
        marker: q(marker),
        highlight: q(highlight),
        info: q(ensure_contrast((125, 196, 255), surface, 4.5)),
        warning: q(ensure_contrast((251, 191, 36), surface, 4.5)),
    }
}

/// Terminal-default colors for `--no-color`.
pub fn plain_theme() -> Theme {
    Theme {
        surface: Color::Reset,
        popup_surface: Color::Reset,
        accent: Color::Reset,
        text: Color::Reset,
        muted_text: Color::Reset,
        popup_text: Color::Reset,
        border: Color::Reset,
        popup_border: Color::Reset,
        grid_minor: Color::Reset,
        grid_major: Color::Reset,
        line: Color::Reset,
        marker: Color::Reset,
        highlight: Color::Reset,
        info: Color::Reset,
        warning: Color::Reset,
    }
}

fn mix_rgb(a: Rgb, b: Rgb, t: f32) -> Rgb {
    let t = t.clamp(0.0, 1.0);
    let mix = |x: u8, y: u8| -> u8 {
        (f32::from(x) + (f32::from(y) - f32::from(x)) * t)
            .round()
            .clamp(0.0, 255.0) as u8
    };
    (mix(a.0, b.0), mix(a.1, b.1), mix(a.2, b.2))
}

fn ensure_contrast(fg: Rgb, bg: Rgb, min_ratio: f32) -> Rgb {
    if contrast_ratio(fg, bg) >= min_ratio {
        return fg;
    }
    let target = if contrast_ratio((255, 255, 255), bg) >= contrast_ratio((0, 0, 0), bg) {
        (255, 255, 255)
    } else {
        (0, 0, 0)
    };

    let mut best = fg;
    let mut best_ratio = contrast_ratio(fg, bg);
    for step in 1..=24 {
        let candidate = mix_rgb(fg, target, step as f32 / 24.0);
        let ratio = contrast_ratio(candidate, bg);
        if ratio > best_ratio {
            best = candidate;
            best_ratio = ratio;
        }
        if ratio >= min_ratio {
            return candidate;
        }
    }
    best
}

fn contrast_ratio(a: Rgb, b: Rgb) -> f32 {
    let l1 = relative_luminance(a);
    let l2 = relative_luminance(b);
    let (hi, lo) = if l1 >= l2 { (l1, l2) } else { (l2, l1) };
    (hi + 0.05) / (lo + 0.05)
}

fn relative_luminance(rgb: Rgb) -> f32 {
    0.2126 * srgb_to_linear(rgb.0) + 0.7152 * srgb_to_linear(rgb.1) + 0.0722 * srgb_to_linear(rgb.2)
}

fn srgb_to_linear(v: u8) -> f32 {
    let s = f32::from(v) / 255.0;
    if s <= 0.04045 {
        s / 12.92
    } else {
        ((s + 0.055) / 1.055).powf(2.4)
    }
}

pub fn quantize(color: Color, capability: ColorCapability) -> Color {
    match (capability, color) {
        (ColorCapability::TrueColor, c) => c,
        (ColorCapability::Xterm256, Color::Rgb(r, g, b)) => {
            let to_cube = |v: u8| -> u8 { ((f32::from(v) / 255.0) * 5.0).round() as u8 };
            Color::Indexed(16 + 36 * to_cube(r) + 6 * to_cube(g) + to_cube(b))
        }
        (ColorCapability::Basic16, Color::Rgb(r, g, b)) => basic16_from_rgb(r, g, b),
        (_, c) => c,
    }
}

fn basic16_from_rgb(r: u8, g: u8, b: u8) -> Color {
    let rf = f32::from(r) / 255.0;
    let gf = f32::from(g) / 255.0;
    let bf = f32::from(b) / 255.0;
    let max = rf.max(gf.max(bf));
    let min = rf.min(gf.min(bf));
    let delta = max - min;
    let light = (max + min) / 2.0;

    if delta < 0.08 {
        return match light {
            l if l < 0.20 => Color::Black,
            l if l < 0.40 => Color::DarkGray,
            l if l < 0.72 => Color::Gray,
            _ => Color::White,
        };
    }

    let hue = if (max - rf).abs() < f32::EPSILON {
        60.0 * ((gf - bf) / delta).rem_euclid(6.0)
    } else if (max - gf).abs() < f32::EPSILON {
        60.0 * (((bf - rf) / delta) + 2.0)
    } else {
        60.0 * (((rf - gf) / delta) + 4.0)
    };

    let bright = light >= 0.55;
    let (dim, lit) = match hue {
        h if !(30.0..330.0).contains(&h) => (Color::Red, Color::LightRed),
        h if h < 90.0 => (Color::Yellow, Color::LightYellow),
        h if h < 150.0 => (Color::Green, Color::LightGreen),
        h if h < 210.0 => (Color::Cyan, Color::LightCyan),
        h if h < 270.0 => (Color::Blue, Color::LightBlue),
        _ => (Color::Magenta, Color::LightMagenta),
    };
    if bright { lit } else { dim }
}
