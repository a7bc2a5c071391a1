use serde::{Deserialize, Serialize};

/// Sentinel option value meaning "see the companion free-text field".
pub const OTHER: &str = "other";

/// Raw form input, exactly as typed. Shared by the HTML form and the JSON API.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApplicationForm {
    pub discord_username: String,
    pub discord_id: String,
    pub name: String,
    pub age: String,
    pub size: String,
    pub race: String,
    pub race_other: String,
    pub hair_type: String,
    pub hair_type_other: String,
    pub why_esex: String,
    pub height: String,
    pub weight: String,
}

/// A closed set of select options with stored values and display labels.
pub trait OptionSet: Sized + Copy + 'static {
    const ALL: &'static [Self];

    fn value(self) -> &'static str;
    fn label(self) -> &'static str;

    fn parse(raw: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|o| o.value() == raw)
    }
}

macro_rules! option_set {
    ($name:ident { $($variant:ident => ($value:literal, $label:literal)),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub enum $name {
            $($variant),+
        }

        impl OptionSet for $name {
            const ALL: &'static [Self] = &[$(Self::$variant),+];

            fn value(self) -> &'static str {
                match self {
                    $(Self::$variant => $value),+
                }
            }

            fn label(self) -> &'static str {
                match self {
                    $(Self::$variant => $label),+
                }
            }
        }
    };
}

option_set!(Size {
    BelowOne => ("below-1", "Below 1 inch"),
    Two => ("2-inches", "2 inches"),
    Three => ("3-inches", "3 inches"),
    Four => ("4-inches", "4 inches"),
    Five => ("5-inches", "5 inches"),
    Six => ("6-inches", "6 inches"),
    Seven => ("7-inches", "7 inches"),
    EightPlus => ("8-plus", "8+ inches"),
});

// `Other` is not listed here; it is the `Choice::Other` escape.
option_set!(Race {
    Black => ("black", "Black"),
    White => ("white", "White"),
    Hispanic => ("hispanic", "Hispanic"),
    Lightskin => ("lightskin", "Lightskin"),
    Mixed => ("mixed", "Mixed"),
    Asian => ("asian", "Asian"),
});

option_set!(HairType {
    Curly => ("curly", "Curly"),
    Straight => ("straight", "Straight"),
    Dreads => ("dreads", "Dreads"),
    Afro => ("afro", "Afro"),
    Twist => ("twist", "Twist"),
});

/// Either a listed option or a free-text override chosen through `"other"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Choice<T> {
    Listed(T),
    Other(String),
}

impl<T: OptionSet> Choice<T> {
    /// `None` when `selected` is neither a listed value nor the sentinel.
    pub fn from_form(selected: &str, other_text: &str) -> Option<Self> {
        if selected == OTHER {
            return Some(Choice::Other(other_text.to_string()));
        }
        T::parse(selected).map(Choice::Listed)
    }

    /// Value to persist. The free text is used as-is, even when empty.
    pub fn resolve(self) -> String {
        match self {
            Choice::Listed(v) => v.value().to_string(),
            Choice::Other(text) => text,
        }
    }
}
