// ABOUTME: Closed string-valued domain enums for record attributes
// ABOUTME: Each enum parses case-insensitively and rejects unknown values with DomainError
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::errors::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Declares a closed enum with its canonical wire names
macro_rules! closed_enum {
    (
        $(#[$meta:meta])*
        $name:ident ($kind:literal) {
            $( $(#[$vmeta:meta])* $variant:ident => $text:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(rename_all = "SCREAMING_SNAKE_CASE")]
        pub enum $name {
            $( $(#[$vmeta])* $variant, )+
        }

        impl $name {
            /// Every variant in declaration order
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            /// Canonical wire name
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $text,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim().to_ascii_uppercase().as_str() {
                    $($text => Ok(Self::$variant),)+
                    _ => Err(DomainError::UnknownVariant {
                        kind: $kind,
                        value: s.to_owned(),
                    }),
                }
            }
        }
    };
}

closed_enum! {
    /// Stool volume
    Volume ("volume") {
        /// Small volume
        Small => "SMALL",
        /// Medium volume
        Medium => "MEDIUM",
        /// Large volume
        Large => "LARGE",
        /// Unusually large volume
        Massive => "MASSIVE",
    }
}

closed_enum! {
    /// Stool color
    Color ("color") {
        /// Brown
        Brown => "BROWN",
        /// Dark brown
        DarkBrown => "DARK_BROWN",
        /// Light brown
        LightBrown => "LIGHT_BROWN",
        /// Yellow
        Yellow => "YELLOW",
        /// Green
        Green => "GREEN",
        /// Red
        Red => "RED",
        /// Black
        Black => "BLACK",
    }
}

closed_enum! {
    /// Stool consistency as reported by the user
    Consistency ("consistency") {
        /// Solid
        Solid => "SOLID",
        /// Soft
        Soft => "SOFT",
        /// Loose
        Loose => "LOOSE",
        /// Watery
        Watery => "WATERY",
    }
}

closed_enum! {
    /// Odor strength
    SmellLevel ("smell level") {
        /// No odor
        None => "NONE",
        /// Mild odor
        Mild => "MILD",
        /// Moderate odor
        Moderate => "MODERATE",
        /// Strong odor
        Strong => "STRONG",
        /// Overwhelming odor
        Overwhelming => "OVERWHELMING",
    }
}

closed_enum! {
    /// Meal slot in the day
    MealCategory ("meal category") {
        /// Breakfast
        Breakfast => "BREAKFAST",
        /// Lunch
        Lunch => "LUNCH",
        /// Dinner
        Dinner => "DINNER",
        /// Snack
        Snack => "SNACK",
        /// Anything else
        Other => "OTHER",
    }
}

closed_enum! {
    /// Body system a symptom belongs to
    SymptomCategory ("symptom category") {
        /// Digestive tract
        Digestive => "DIGESTIVE",
        /// Abdominal
        Abdominal => "ABDOMINAL",
        /// Whole-body
        Systemic => "SYSTEMIC",
        /// Neurological
        Neurological => "NEUROLOGICAL",
        /// Anything else
        Other => "OTHER",
    }
}

closed_enum! {
    /// Specific symptom kind
    SymptomType ("symptom type") {
        /// Bloating
        Bloating => "BLOATING",
        /// Cramps
        Cramps => "CRAMPS",
        /// Nausea
        Nausea => "NAUSEA",
        /// Heartburn
        Heartburn => "HEARTBURN",
        /// Constipation
        Constipation => "CONSTIPATION",
        /// Diarrhea
        Diarrhea => "DIARRHEA",
        /// Gas
        Gas => "GAS",
        /// Fatigue
        Fatigue => "FATIGUE",
        /// Anything else
        Other => "OTHER",
    }
}

closed_enum! {
    /// Therapeutic class of a medication
    MedicationCategory ("medication category") {
        /// Gastrointestinal
        Gastrointestinal => "GASTROINTESTINAL",
        /// Pain relief
        PainRelief => "PAIN_RELIEF",
        /// Antibiotic
        Antibiotic => "ANTIBIOTIC",
        /// Probiotics
        Probiotics => "PROBIOTICS",
        /// Supplements
        Supplements => "SUPPLEMENTS",
        /// Anti-inflammatory
        AntiInflammatory => "ANTI_INFLAMMATORY",
        /// Anything else
        Other => "OTHER",
    }
}

closed_enum! {
    /// Physical form of a medication
    MedicationForm ("medication form") {
        /// Tablet
        Tablet => "TABLET",
        /// Capsule
        Capsule => "CAPSULE",
        /// Liquid
        Liquid => "LIQUID",
        /// Cream
        Cream => "CREAM",
        /// Powder
        Powder => "POWDER",
        /// Injection
        Injection => "INJECTION",
        /// Suppository
        Suppository => "SUPPOSITORY",
        /// Anything else
        Other => "OTHER",
    }
}

closed_enum! {
    /// Administration route of a medication
    MedicationRoute ("medication route") {
        /// Oral
        Oral => "ORAL",
        /// Topical
        Topical => "TOPICAL",
        /// Rectal
        Rectal => "RECTAL",
        /// Injection
        Injection => "INJECTION",
        /// Inhalation
        Inhalation => "INHALATION",
        /// Anything else
        Other => "OTHER",
    }
}

closed_enum! {
    /// User assertion about a meal and a later outcome
    CorrelationType ("correlation type") {
        /// The meal made the outcome worse
        Positive => "POSITIVE",
        /// The meal helped
        Negative => "NEGATIVE",
        /// No effect
        Neutral => "NEUTRAL",
        /// The user is not sure
        Unknown => "UNKNOWN",
    }
}
