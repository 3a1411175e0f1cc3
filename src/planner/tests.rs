use super::normalize::normalize_markdown;
use super::*;

fn paris() -> TripPreferences {
    TripPreferences {
        destination: "Paris".to_string(),
        duration_days: 5,
        budget: BudgetTier::Moderate,
        confirmed: true,
        ..TripPreferences::default()
    }
}

#[test]
fn defaults_match_form_defaults() {
    let prefs = TripPreferences::default();
    assert_eq!(prefs.duration_days, 5);
    assert_eq!(prefs.budget, BudgetTier::Moderate);
    assert_eq!(prefs.mobility, MobilityLevel::NoIssues);
    assert_eq!(prefs.accommodation, vec![AccommodationPreference::CentralLocation]);
    assert_eq!(prefs.travel_style, vec![TravelStyle::Culture, TravelStyle::Nature]);
    assert!(prefs.interests.is_empty());
    assert!(!prefs.confirmed);
    assert!(!prefs.has_destination());
}

#[test]
fn itinerary_prompt_interpolates_key_fields_once() {
    let prompt = itinerary_prompt(&paris());

    assert_eq!(prompt.matches("Paris").count(), 1);
    assert_eq!(prompt.matches("5 days").count(), 1);
    assert_eq!(prompt.matches("Moderate").count(), 1);
    assert!(prompt.starts_with("Create a comprehensive travel plan for Paris for 5 days."));
}

#[test]
fn itinerary_prompt_lists_the_six_sections_and_format() {
    let prompt = itinerary_prompt(&paris());

    for section in [
        "1. 🌞 Best Time to Visit",
        "2. 🏨 Accommodation Recommendations",
        "3. 🗺️ Day-by-Day Itinerary",
        "4. 🍽️ Culinary Experiences",
        "5. 💡 Practical Travel Tips",
        "6. 💰 Estimated Total Trip Cost",
    ] {
        assert!(prompt.contains(section), "missing section {section}");
    }
    assert!(prompt.contains("verified live links"));
    assert!(prompt.contains("clear markdown with headings and bullet points"));
}

#[test]
fn itinerary_prompt_uses_fallbacks_for_empty_fields() {
    let prompt = itinerary_prompt(&paris());

    assert!(prompt.contains("- Specific Interests: None"));
    assert!(prompt.contains("- Dietary Preferences: None"));
    assert!(prompt.contains("Additional Details: None provided"));
    assert!(prompt.contains("- Travel Styles: Culture, Nature"));
    assert!(prompt.contains("- Accommodation Preferences: Central Location"));
}

#[test]
fn itinerary_prompt_includes_optional_details() {
    let prefs = TripPreferences {
        dietary: " vegetarian ".to_string(),
        mobility: MobilityLevel::WheelchairAccessible,
        interests: vec![Interest::Museums, Interest::ArtGalleries],
        extra_details: "Travelling with grandparents".to_string(),
        ..paris()
    };
    let prompt = itinerary_prompt(&prefs);

    assert!(prompt.contains("- Dietary Preferences: vegetarian\n"));
    assert!(prompt.contains("- Mobility Concerns: Wheelchair Accessible Needed"));
    assert!(prompt.contains("- Specific Interests: Museums, Art Galleries"));
    assert!(prompt.contains("Additional Details: Travelling with grandparents"));
}

#[test]
fn refinement_prompt_enumerates_every_preference() {
    let prefs = TripPreferences {
        dietary: "vegan".to_string(),
        interests: vec![Interest::Nightlife],
        ..paris()
    };
    let prompt = refinement_prompt(&prefs);

    for line in [
        "- Destination: Paris",
        "- Duration: 5 days",
        "- Budget Level: Moderate",
        "- Travel Styles: Culture, Nature",
        "- Specific Interests: Nightlife",
        "- Dietary Preferences: vegan",
        "- Mobility Concerns: No Issues",
        "- Accommodation Preferences: Central Location",
    ] {
        assert!(prompt.contains(line), "missing line {line}");
    }
    assert!(prompt.contains("require further clarification"));
}

#[test]
fn follow_up_prompt_embeds_plan_and_question() {
    let prompt = follow_up_prompt("Paris", "## Day 1\n- Louvre", " Is tap water safe? ");

    assert!(prompt.starts_with("I have a travel plan for Paris."));
    assert!(prompt.contains("## Day 1\n- Louvre"));
    assert!(prompt.contains("answer this specific question: Is tap water safe?\n"));
    assert!(prompt.contains("focused and concise"));
}

#[test]
fn normalized_trims_and_dedups() {
    let prefs = TripPreferences {
        destination: "  Lisbon ".to_string(),
        travel_style: vec![TravelStyle::Food, TravelStyle::Culture, TravelStyle::Food],
        interests: vec![Interest::Museums, Interest::Museums],
        ..TripPreferences::default()
    }
    .normalized();

    assert_eq!(prefs.destination, "Lisbon");
    assert_eq!(prefs.travel_style, vec![TravelStyle::Food, TravelStyle::Culture]);
    assert_eq!(prefs.interests, vec![Interest::Museums]);
}

#[test]
fn duration_bounds() {
    let mut prefs = paris();
    prefs.duration_days = MIN_DURATION_DAYS;
    assert!(prefs.duration_in_range());
    prefs.duration_days = MAX_DURATION_DAYS;
    assert!(prefs.duration_in_range());
    prefs.duration_days = 0;
    assert!(!prefs.duration_in_range());
    prefs.duration_days = 31;
    assert!(!prefs.duration_in_range());
}

#[test]
fn labels_cover_all_options() {
    assert_eq!(
        BudgetTier::ALL.iter().map(|b| b.label()).collect::<Vec<_>>(),
        vec!["Budget", "Moderate", "Luxury"]
    );
    assert_eq!(MobilityLevel::ALL.len(), 3);
    assert_eq!(AccommodationPreference::ALL.len(), 5);
    assert_eq!(TravelStyle::ALL.len(), 6);
    assert_eq!(Interest::ALL.len(), 6);
    assert_eq!(Interest::LocalMarkets.to_string(), "Local Markets");
}

#[test]
fn normalize_replaces_divides_with_pipe() {
    let normalized = normalize_markdown("∣ Day ∣ Plan ∣\n∣---∣---∣");
    assert_eq!(normalized, "| Day | Plan |\n|---|---|");
    assert!(!normalized.contains('∣'));
}

#[test]
fn normalize_collapses_newline_runs_idempotently() {
    let raw = "# Paris\n\n\n\n## Day 1\n\n\nLouvre\n\nOrsay";
    let once = normalize_markdown(raw);

    assert_eq!(once, "# Paris\n\n## Day 1\n\nLouvre\n\nOrsay");
    assert!(!once.contains("\n\n\n"));
    assert_eq!(normalize_markdown(&once), once);
}

#[test]
fn itinerary_result_keeps_raw_fallback_text() {
    let raw = ItineraryResult::from_raw("a\n\n\nb ∣");
    assert_eq!(raw.as_str(), "a\n\n\nb ∣");

    let cleaned = ItineraryResult::from_content("a\n\n\nb ∣");
    assert_eq!(cleaned.to_string(), "a\n\nb |");
}
