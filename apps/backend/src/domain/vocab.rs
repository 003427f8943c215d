//! Static vocabularies that character cards are drawn from.

pub const PROFESSIONS: &[&str] = &[
    "Doctor",
    "Teacher",
    "Engineer",
    "Chef",
    "Police Officer",
    "Firefighter",
    "Programmer",
    "Architect",
    "Electrician",
    "Plumber",
    "Mechanic",
    "Farmer",
    "Veterinarian",
    "Psychologist",
    "Journalist",
    "Artist",
    "Musician",
    "Actor",
    "Dancer",
    "Writer",
    "Librarian",
    "Salesperson",
    "Accountant",
    "Lawyer",
    "Judge",
    "Military",
    "Stripper",
    "Venereologist",
    "Webcam Model",
    "YouTuber",
    "Sex Shop Salesperson",
    "Airdrop Hunter",
    "Kaito Yapper",
    "CT",
    "Pilot",
    "Flight Attendant",
    "Driver",
    "Postman",
    "Security Guard",
];

pub const HEALTH: &[&str] = &[
    "Healthy",
    "Nearsightedness",
    "Asthma",
    "Diabetes",
    "Nut allergy",
    "Hypertension",
    "Arthritis",
    "Migraine",
    "Insomnia",
    "Depression",
    "Anxiety",
    "Sports injury",
    "Heart surgery",
    "Leg prosthesis",
    "Hearing aid",
    "Chronic back pain",
    "Epilepsy",
    "Anemia",
    "Poor coordination",
    "Fatigue",
];

pub const HOBBIES: &[&str] = &[
    "Reading",
    "Sports",
    "Cooking",
    "Drawing",
    "Music",
    "Dancing",
    "Photography",
    "Gardening",
    "Fishing",
    "Hunting",
    "Travel",
    "Collecting",
    "Knitting",
    "Chess",
    "Video games",
    "Movies",
    "Theater",
    "Astronomy",
    "Geology",
    "Archeology",
    "History",
    "Languages",
    "Programming",
    "Robotics",
    "Modeling",
    "Rock Climbing",
    "Parachuting",
    "Diving",
    "Surfing",
    "Yoga",
];

pub const PHOBIAS: &[&str] = &[
    "Arachnophobia (spiders)",
    "Claustrophobia (enclosed spaces)",
    "Acrophobia (heights)",
    "Aerophobia (flying)",
    "Aquaphobia (water)",
    "Social phobia (people)",
    "Agoraphobia (open spaces)",
    "Nyctophobia (darkness)",
    "Ophidiophobia (snakes)",
    "Cynophobia (dogs)",
    "Misophobia (dirt)",
    "Hemophobia (blood)",
    "Thanatophobia (death)",
    "Autophobia (loneliness)",
    "Phonophobia (loud noises)",
    "Pyrophobia (fire)",
    "Trypophobia (holes)",
    "Entomophobia (insects)",
    "Meteorophobia (weather)",
    "Xenophobia (strangers)",
];

pub const BAGGAGE: &[&str] = &[
    "Backpack with food",
    "First aid kit",
    "Tool kit",
    "Sleeping bag",
    "Tent",
    "Flashlight with batteries",
    "Radio",
    "Compass and maps",
    "50m rope",
    "Knife",
    "Lighter",
    "Waterproof matches",
    "Canned food",
    "10l water",
    "Blanket",
    "Spare clothes",
    "Books",
    "Playing cards",
    "Musical instrument",
    "Camera",
    "Documents",
    "Money",
    "Jewelry",
    "Family photos",
    "Weapons",
    "Alcohol",
    "Cigarettes",
    "Medicine",
    "Plant seeds",
    "Fishing rod",
];

/// Shared by both fact slots of a card.
pub const FACTS: &[&str] = &[
    "Served in the army",
    "Knows martial arts",
    "Can cook",
    "Speaks 3 languages",
    "Has a driver's license",
    "Can sew",
    "Knows first aid",
    "Can repair appliances",
    "Is a good shot",
    "Knows how to survive in the wild",
    "Knows psychology",
    "Can sing",
    "Is a good dancer",
    "Can play an instrument",
    "Knows history",
    "Can count quickly",
    "Has a good memory",
    "Knows geography",
    "Can draw maps",
    "Knows astronomy",
    "Can predict the weather",
    "Has a good sense of direction",
    "Can climb trees",
    "Runs fast",
    "Strong arms",
    "Good eyesight",
    "Keen hearing",
    "Can sense danger",
    "Can persuade people",
    "Good leader",
];

pub const GENDERS: &[&str] = &["Male", "Female"];

/// Cosmetic lines attached to round transitions.
pub const ROUND_MESSAGES: &[&str] = &[
    "Attention! A new round is about to begin.",
    "Get ready for the next stage!",
    "An important event is coming soon...",
    "You have time to discuss your strategy.",
    "The next round could change everything!",
];
