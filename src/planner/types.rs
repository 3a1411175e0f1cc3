use std::fmt;

use clap::ValueEnum;

pub const MIN_DURATION_DAYS: u32 = 1;
pub const MAX_DURATION_DAYS: u32 = 30;
pub const DEFAULT_DURATION_DAYS: u32 = 5;

/// A closed set of options the user picks from, with the human label that
/// goes into prompts and summaries.
pub trait Choice: Copy + PartialEq + 'static {
    const ALL: &'static [Self];

    fn label(self) -> &'static str;
}

macro_rules! choice_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $($variant:ident => $label:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
        pub enum $name {
            $($variant),+
        }

        impl Choice for $name {
            const ALL: &'static [Self] = &[$($name::$variant),+];

            fn label(self) -> &'static str {
                match self {
                    $($name::$variant => $label),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }
    };
}

choice_enum! {
    pub enum BudgetTier {
        Budget => "Budget",
        Moderate => "Moderate",
        Luxury => "Luxury",
    }
}

choice_enum! {
    pub enum MobilityLevel {
        NoIssues => "No Issues",
        LimitedWalking => "Limited Walking",
        WheelchairAccessible => "Wheelchair Accessible Needed",
    }
}

choice_enum! {
    pub enum AccommodationPreference {
        CentralLocation => "Central Location",
        Quiet => "Quiet",
        FamilyFriendly => "Family Friendly",
        Luxury => "Luxury",
        Budget => "Budget",
    }
}

choice_enum! {
    pub enum TravelStyle {
        Culture => "Culture",
        Nature => "Nature",
        Adventure => "Adventure",
        Relaxation => "Relaxation",
        Food => "Food",
        Shopping => "Shopping",
    }
}

choice_enum! {
    pub enum Interest {
        Museums => "Museums",
        LocalMarkets => "Local Markets",
        HistoricalSites => "Historical Sites",
        OutdoorActivities => "Outdoor Activities",
        Nightlife => "Nightlife",
        ArtGalleries => "Art Galleries",
    }
}

/// Everything the user told us about the trip. Rebuilt from the current
/// inputs every time, never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TripPreferences {
    pub destination: String,
    pub duration_days: u32,
    pub budget: BudgetTier,
    pub dietary: String,
    pub mobility: MobilityLevel,
    pub accommodation: Vec<AccommodationPreference>,
    pub travel_style: Vec<TravelStyle>,
    pub interests: Vec<Interest>,
    pub extra_details: String,
    pub confirmed: bool,
}

impl Default for TripPreferences {
    fn default() -> Self {
        Self {
            destination: String::new(),
            duration_days: DEFAULT_DURATION_DAYS,
            budget: BudgetTier::Moderate,
            dietary: String::new(),
            mobility: MobilityLevel::NoIssues,
            accommodation: vec![AccommodationPreference::CentralLocation],
            travel_style: vec![TravelStyle::Culture, TravelStyle::Nature],
            interests: Vec::new(),
            extra_details: String::new(),
            confirmed: false,
        }
    }
}

impl TripPreferences {
    /// Trims free text and drops repeated selections, keeping first-seen order.
    pub fn normalized(mut self) -> Self {
        self.destination = self.destination.trim().to_string();
        self.dietary = self.dietary.trim().to_string();
        self.extra_details = self.extra_details.trim().to_string();
        self.accommodation = dedup_choices(self.accommodation);
        self.travel_style = dedup_choices(self.travel_style);
        self.interests = dedup_choices(self.interests);
        self
    }

    pub fn has_destination(&self) -> bool {
        !self.destination.trim().is_empty()
    }

    pub fn duration_in_range(&self) -> bool {
        (MIN_DURATION_DAYS..=MAX_DURATION_DAYS).contains(&self.duration_days)
    }

    pub fn dietary_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        non_empty_or(&self.dietary, fallback)
    }

    pub fn extra_details_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        non_empty_or(&self.extra_details, fallback)
    }
}

fn non_empty_or<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    let trimmed = value.trim();
    if trimmed.is_empty() { fallback } else { trimmed }
}

pub fn dedup_choices<T: Choice>(items: Vec<T>) -> Vec<T> {
    let mut unique = Vec::with_capacity(items.len());
    for item in items {
        if !unique.contains(&item) {
            unique.push(item);
        }
    }
    unique
}

/// Comma-joined labels, or `fallback` when nothing was selected.
pub fn join_labels<T: Choice>(items: &[T], fallback: &str) -> String {
    if items.is_empty() {
        return fallback.to_string();
    }
    items
        .iter()
        .map(|item| item.label())
        .collect::<Vec<_>>()
        .join(", ")
}
