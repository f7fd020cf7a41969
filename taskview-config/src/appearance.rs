use std::str::FromStr;

use knuffel::errors::DecodeError;
use miette::IntoDiagnostic;

pub const DEFAULT_BACKGROUND_COLOR: Color = Color::from_array_unpremul([0., 0., 0., 1.]);
pub const DEFAULT_ACTIVE_BORDER_COLOR: Color = Color::from_array_unpremul([0.2, 0.8, 1., 1.]);
pub const DEFAULT_INACTIVE_BORDER_COLOR: Color = Color::from_array_unpremul([0.35, 0.35, 0.35, 1.]);

/// RGB color in [0, 1] with unpremultiplied alpha.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const fn new_unpremul(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub fn from_rgba8_unpremul(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self::from_array_unpremul([
            f32::from(r) / 255.,
            f32::from(g) / 255.,
            f32::from(b) / 255.,
            f32::from(a) / 255.,
        ])
    }

    pub const fn from_array_unpremul([r, g, b, a]: [f32; 4]) -> Self {
        Self { r, g, b, a }
    }

    /// Same color with alpha forced to 1.
    pub fn opaque(self) -> Self {
        Self { a: 1., ..self }
    }
}

impl FromStr for Color {
    type Err = miette::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let color = csscolorparser::parse(s).into_diagnostic()?.to_array();
        Ok(Self::from_array_unpremul(color))
    }
}

impl<S: knuffel::traits::ErrorSpan> knuffel::DecodeScalar<S> for Color {
    fn type_check(
        type_name: &Option<knuffel::span::Spanned<knuffel::ast::TypeName, S>>,
        ctx: &mut knuffel::decode::Context<S>,
    ) {
        if let Some(type_name) = &type_name {
            ctx.emit_error(DecodeError::unexpected(
                type_name,
                "type name",
                "no type name expected for this node",
            ));
        }
    }

    fn raw_decode(
        val: &knuffel::span::Spanned<knuffel::ast::Literal, S>,
        ctx: &mut knuffel::decode::Context<S>,
    ) -> Result<Color, DecodeError<S>> {
        match &**val {
            knuffel::ast::Literal::String(ref s) => match Color::from_str(s) {
                Ok(color) => Ok(color),
                Err(err) => {
                    ctx.emit_error(DecodeError::conversion(val, format!("{err}")));
                    Ok(Color::default())
                }
            },
            _ => {
                ctx.emit_error(DecodeError::unsupported(val, "colors must be strings"));
                Ok(Color::default())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_hex_and_css() {
        assert_eq!(
            "#ff0000".parse::<Color>().unwrap(),
            Color::new_unpremul(1., 0., 0., 1.)
        );
        assert_eq!(
            "transparent".parse::<Color>().unwrap(),
            Color::new_unpremul(0., 0., 0., 0.)
        );
        assert!("#12345".parse::<Color>().is_err());
    }

    #[test]
    fn opaque_strips_alpha() {
        let color = Color::new_unpremul(0.2, 0.4, 0.6, 0.5);
        assert_eq!(color.opaque(), Color::new_unpremul(0.2, 0.4, 0.6, 1.));
    }
}
