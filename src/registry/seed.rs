// Fixed activity list loaded at startup

use indexmap::IndexMap;

use super::Activity;

/// (name, description, schedule, max participants, initial participants)
type SeedEntry = (&'static str, &'static str, &'static str, u32, [&'static str; 2]);

const SEED: [SeedEntry; 9] = [
    (
        "Chess Club",
        "Learn strategies and compete in chess tournaments",
        "Fridays, 3:30 PM - 5:00 PM",
        12,
        ["michael@mergington.edu", "daniel@mergington.edu"],
    ),
    (
        "Programming Class",
        "Learn programming fundamentals and build software projects",
        "Tuesdays and Thursdays, 3:30 PM - 4:30 PM",
        20,
        ["emma@mergington.edu", "sophia@mergington.edu"],
    ),
    (
        "Gym Class",
        "Physical education and sports activities",
        "Mondays, Wednesdays, Fridays, 2:00 PM - 3:00 PM",
        30,
        ["john@mergington.edu", "olivia@mergington.edu"],
    ),
    // Sports
    (
        "Basketball Team",
        "Competitive basketball team competing in regional tournaments",
        "Tuesdays and Thursdays, 4:00 PM - 6:00 PM",
        15,
        ["james@mergington.edu", "sarah@mergington.edu"],
    ),
    (
        "Soccer Club",
        "Learn soccer skills and participate in inter-school matches",
        "Mondays and Wednesdays, 3:30 PM - 5:30 PM",
        22,
        ["alex@mergington.edu", "maya@mergington.edu"],
    ),
    // Arts
    (
        "Drama Club",
        "Explore acting, stage performance, and theater production",
        "Thursdays, 3:30 PM - 5:30 PM",
        25,
        ["lily@mergington.edu", "noah@mergington.edu"],
    ),
    (
        "Art Studio",
        "Creative painting, drawing, and visual arts workshops",
        "Fridays, 2:30 PM - 4:30 PM",
        18,
        ["grace@mergington.edu", "ethan@mergington.edu"],
    ),
    // Academic
    (
        "Debate Society",
        "Develop critical thinking and public speaking through competitive debates",
        "Wednesdays, 3:30 PM - 5:00 PM",
        16,
        ["isabella@mergington.edu", "lucas@mergington.edu"],
    ),
    (
        "Science Club",
        "Conduct experiments, explore STEM topics, and participate in science fairs",
        "Mondays, 3:30 PM - 5:00 PM",
        20,
        ["ava@mergington.edu", "mason@mergington.edu"],
    ),
];

/// Build the startup activity map in seed order
pub fn default_activities() -> IndexMap<String, Activity> {
    SEED.iter()
        .map(|(name, description, schedule, max_participants, participants)| {
            (
                (*name).to_string(),
                Activity {
                    description: (*description).to_string(),
                    schedule: (*schedule).to_string(),
                    max_participants: *max_participants,
                    participants: participants.iter().map(ToString::to_string).collect(),
                },
            )
        })
        .collect()
}
