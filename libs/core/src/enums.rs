//! Closed token sets used as leaf fields throughout the card tree.
//!
//! Every enum carries its declared-order variant table so lookups can accept
//! either a (case-insensitive) token or a numeric ordinal. Tables are built at
//! compile time and never mutated.

use serde::{Serialize, Serializer};

/// A closed, string-valued token set with a fixed declared order.
pub trait Token: Copy + Sized + 'static {
    /// Variants in declared order; ordinal encodings index into this table.
    const VARIANTS: &'static [Self];

    /// Canonical wire token for this variant.
    fn as_token(self) -> &'static str;

    /// Case-insensitive token lookup.
    fn lookup(token: &str) -> Option<Self> {
        Self::VARIANTS
            .iter()
            .copied()
            .find(|variant| variant.as_token().eq_ignore_ascii_case(token))
    }

    /// Ordinal lookup into the declared order.
    fn ordinal(index: usize) -> Option<Self> {
        Self::VARIANTS.get(index).copied()
    }
}

macro_rules! token_enum {
    (
        $(#[$meta:meta])*
        $name:ident { $($variant:ident => $token:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub enum $name {
            $($variant),+
        }

        impl Token for $name {
            const VARIANTS: &'static [$name] = &[$($name::$variant),+];

            fn as_token(self) -> &'static str {
                match self {
                    $($name::$variant => $token),+
                }
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_token())
            }
        }
    };
}

token_enum! {
    /// Foreground color tokens; concrete hex values come from the host config.
    TextColor {
        Default => "Default",
        Dark => "Dark",
        Light => "Light",
        Accent => "Accent",
        Good => "Good",
        Warning => "Warning",
        Attention => "Attention",
    }
}

token_enum! {
    FontSize {
        Default => "Default",
        Small => "Small",
        Medium => "Medium",
        Large => "Large",
        ExtraLarge => "ExtraLarge",
    }
}

token_enum! {
    FontType {
        Default => "Default",
        Monospace => "Monospace",
    }
}

token_enum! {
    TextWeight {
        Lighter => "Lighter",
        Default => "Default",
        Bolder => "Bolder",
    }
}

token_enum! {
    /// `heading` changes the defaults a TextBlock resolves when `size` and
    /// `weight` are absent.
    TextBlockStyle {
        Default => "default",
        Heading => "heading",
    }
}

token_enum! {
    HorizontalAlignment {
        Left => "Left",
        Center => "Center",
        Right => "Right",
    }
}

token_enum! {
    VerticalAlignment {
        Top => "Top",
        Center => "Center",
        Bottom => "Bottom",
    }
}

token_enum! {
    ContainerStyle {
        Default => "default",
        Emphasis => "emphasis",
        Accent => "accent",
        Good => "good",
        Attention => "attention",
        Warning => "warning",
    }
}

token_enum! {
    ImageSize {
        Auto => "Auto",
        Stretch => "Stretch",
        Small => "Small",
        Medium => "Medium",
        Large => "Large",
    }
}

token_enum! {
    ImageStyle {
        Default => "Default",
        Person => "Person",
        RoundedCorners => "RoundedCorners",
    }
}

token_enum! {
    Spacing {
        None => "None",
        ExtraSmall => "ExtraSmall",
        Small => "Small",
        Default => "Default",
        Medium => "Medium",
        Large => "Large",
        ExtraLarge => "ExtraLarge",
        Padding => "Padding",
    }
}

token_enum! {
    TextInputStyle {
        Text => "Text",
        Tel => "Tel",
        Url => "Url",
        Email => "Email",
        Password => "Password",
    }
}

token_enum! {
    ChoiceInputStyle {
        Compact => "compact",
        Expanded => "expanded",
        Filtered => "filtered",
    }
}

token_enum! {
    /// Layout axis for composed UI nodes.
    Orientation {
        Horizontal => "Horizontal",
        Vertical => "Vertical",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_is_case_insensitive() {
        assert_eq!(FontSize::lookup("MEDIUM"), Some(FontSize::Medium));
        assert_eq!(FontSize::lookup("medium"), Some(FontSize::Medium));
        assert_eq!(FontSize::lookup("bogus"), None);
    }

    #[test]
    fn ordinal_follows_declared_order() {
        assert_eq!(TextWeight::ordinal(0), Some(TextWeight::Lighter));
        assert_eq!(TextWeight::ordinal(2), Some(TextWeight::Bolder));
        assert_eq!(TextWeight::ordinal(3), None);
    }

    #[test]
    fn container_style_uses_lowercase_tokens() {
        assert_eq!(ContainerStyle::Emphasis.as_token(), "emphasis");
        assert_eq!(ChoiceInputStyle::Compact.as_token(), "compact");
    }
}
