use super::types::{TripPreferences, join_labels};

pub const AGENT_NAME: &str = "Travel Planner";

pub const AGENT_INSTRUCTIONS: [&str; 5] = [
    "System Prompt: You are an AI travel planning assistant. Your goal is to generate a highly personalized travel itinerary.",
    "Input Refinement: Ask clarifying questions to gather detailed information about dietary preferences, mobility concerns, accommodation preferences, and specific interests if not provided.",
    "Activity Suggestions: Use live web search tools to gather up-to-date information on attractions, dining, accommodations, and transportation options that match user inputs.",
    "Itinerary Generation: Create a detailed, day-by-day itinerary that includes seasonal highlights, top attractions, local culinary experiences, and practical travel tips. Always include verified source links.",
    "Ensure the itinerary is clear, well-structured, and tailored to the provided travel preferences.",
];

/// Asks the agent to echo the preferences back and flag anything unclear.
pub fn refinement_prompt(prefs: &TripPreferences) -> String {
    format!(
        "System Prompt:
You are an AI travel assistant. Gather and confirm the following details:
- Destination: {destination}
- Duration: {duration} days
- Budget Level: {budget}
- Travel Styles: {styles}
- Specific Interests: {interests}
- Dietary Preferences: {dietary}
- Mobility Concerns: {mobility}
- Accommodation Preferences: {accommodation}

Ask if any of these details require further clarification before generating a plan.
Provide a short confirmation message with any suggestions for additional details if needed.",
        destination = prefs.destination.trim(),
        duration = prefs.duration_days,
        budget = prefs.budget,
        styles = join_labels(&prefs.travel_style, "None"),
        interests = join_labels(&prefs.interests, "None"),
        dietary = prefs.dietary_or("None"),
        mobility = prefs.mobility,
        accommodation = join_labels(&prefs.accommodation, "None"),
    )
}

/// The main request: preferences plus the six-section output contract.
///
/// Destination, duration and budget tier are each interpolated exactly once.
pub fn itinerary_prompt(prefs: &TripPreferences) -> String {
    format!(
        "Create a comprehensive travel plan for {destination} for {duration} days.

Travel Preferences:
- Budget Level: {budget}
- Travel Styles: {styles}
- Specific Interests: {interests}
- Dietary Preferences: {dietary}
- Mobility Concerns: {mobility}
- Accommodation Preferences: {accommodation}

Additional Details: {details}

The itinerary should include:
1. 🌞 Best Time to Visit:
   - Seasonal highlights and weather considerations.
2. 🏨 Accommodation Recommendations:
   - Options within the selected budget range, with details on location and amenities.
3. 🗺️ Day-by-Day Itinerary:
   - Detailed daily activities, sightseeing, and local experiences.
4. 🍽️ Culinary Experiences:
   - Recommended restaurants and local cuisine, considering dietary needs.
5. 💡 Practical Travel Tips:
   - Local transportation, cultural etiquette, safety tips, and estimated daily costs.
6. 💰 Estimated Total Trip Cost:
   - Expense breakdown and money-saving tips.

Include up-to-date suggestions with verified live links for attractions, accommodations, and dining.
Format the response in clear markdown with headings and bullet points.",
        destination = prefs.destination.trim(),
        duration = prefs.duration_days,
        budget = prefs.budget,
        styles = join_labels(&prefs.travel_style, "None"),
        interests = join_labels(&prefs.interests, "None"),
        dietary = prefs.dietary_or("None"),
        mobility = prefs.mobility,
        accommodation = join_labels(&prefs.accommodation, "None"),
        details = prefs.extra_details_or("None provided"),
    )
}

/// Follow-up question answered strictly against the stored itinerary.
pub fn follow_up_prompt(destination: &str, itinerary: &str, question: &str) -> String {
    format!(
        "I have a travel plan for {destination}. Here is the existing plan:
{itinerary}

Now, please answer this specific question: {question}

Provide a focused and concise answer related to the travel itinerary.",
        destination = destination.trim(),
        question = question.trim(),
    )
}
