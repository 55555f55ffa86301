//! Mood-keyed content recommendation selector.
//!
//! A static catalog ties each emotion label to three content items (music,
//! podcast, meditation). Selection is a pure lookup; the only randomness is
//! the intro-phrase pick, which draws from an injected RNG so narratives are
//! reproducible under a fixed seed.

use crate::emotion::EmotionLabel;
use rand::Rng;
use serde::Serialize;
use std::fmt;

/// Content catalog categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentCategory {
    Music,
    Podcast,
    Meditation,
    Audiobook,
}

impl ContentCategory {
    /// Lowercase display name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ContentCategory::Music => "music",
            ContentCategory::Podcast => "podcast",
            ContentCategory::Meditation => "meditation",
            ContentCategory::Audiobook => "audiobook",
        }
    }
}

impl fmt::Display for ContentCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single catalog entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ContentItem {
    /// Unique catalog id.
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub category: ContentCategory,
    /// Display duration, e.g. "45 min".
    pub duration: Option<&'static str>,
    pub image_url: Option<&'static str>,
}

const fn item(
    id: &'static str,
    title: &'static str,
    description: &'static str,
    category: ContentCategory,
    duration: &'static str,
) -> ContentItem {
    ContentItem {
        id,
        title,
        description,
        category,
        duration: Some(duration),
        image_url: None,
    }
}

const HAPPY_ITEMS: [ContentItem; 3] = [
    item(
        "h1",
        "Happy Vibes Playlist",
        "Upbeat songs to celebrate your good mood",
        ContentCategory::Music,
        "45 min",
    ),
    item(
        "h2",
        "The Comedy Hour",
        "Laugh along with the best stand-up comedians",
        ContentCategory::Podcast,
        "60 min",
    ),
    item(
        "h3",
        "Gratitude Meditation",
        "Enhance your positive feelings with gratitude",
        ContentCategory::Meditation,
        "12 min",
    ),
];

const SAD_ITEMS: [ContentItem; 3] = [
    item(
        "s1",
        "Comforting Classics",
        "Gentle piano melodies to soothe your soul",
        ContentCategory::Music,
        "50 min",
    ),
    item(
        "s2",
        "The Healing Podcast",
        "Stories of overcoming difficult times",
        ContentCategory::Podcast,
        "35 min",
    ),
    item(
        "s3",
        "Compassionate Self-Care",
        "A guided meditation for difficult emotions",
        ContentCategory::Meditation,
        "15 min",
    ),
];

const STRESSED_ITEMS: [ContentItem; 3] = [
    item(
        "st1",
        "Stress Relief Sounds",
        "Calming nature sounds and gentle ambient music",
        ContentCategory::Music,
        "60 min",
    ),
    item(
        "st2",
        "The Calm Space",
        "Practical strategies for managing stress",
        ContentCategory::Podcast,
        "25 min",
    ),
    item(
        "st3",
        "Deep Breathing Session",
        "Guided breathing exercises to reduce stress",
        ContentCategory::Meditation,
        "10 min",
    ),
];

const CALM_ITEMS: [ContentItem; 3] = [
    item(
        "c1",
        "Peaceful Ambient Mix",
        "Gentle atmospheric sounds for your relaxed state",
        ContentCategory::Music,
        "65 min",
    ),
    item(
        "c2",
        "Mindful Living",
        "Conversations about maintaining balance and peace",
        ContentCategory::Podcast,
        "40 min",
    ),
    item(
        "c3",
        "Body Scan Relaxation",
        "Enhance your calm state with this guided relaxation",
        ContentCategory::Meditation,
        "18 min",
    ),
];

const EXCITED_ITEMS: [ContentItem; 3] = [
    item(
        "e1",
        "Power Mix",
        "High-energy tracks to match your enthusiasm",
        ContentCategory::Music,
        "55 min",
    ),
    item(
        "e2",
        "Innovation Nation",
        "Inspiring stories of creativity and achievement",
        ContentCategory::Podcast,
        "45 min",
    ),
    item(
        "e3",
        "Channeling Energy Meditation",
        "Direct your excitement productively",
        ContentCategory::Meditation,
        "12 min",
    ),
];

const NEUTRAL_ITEMS: [ContentItem; 3] = [
    item(
        "n1",
        "Balanced Playlist",
        "A mix of gentle and uplifting tracks",
        ContentCategory::Music,
        "50 min",
    ),
    item(
        "n2",
        "Curious Minds",
        "Interesting facts and stories about the world",
        ContentCategory::Podcast,
        "30 min",
    ),
    item(
        "n3",
        "Present Moment Awareness",
        "Center yourself with this mindfulness practice",
        ContentCategory::Meditation,
        "15 min",
    ),
];

/// Intro phrases spoken before listing recommendations, per emotion.
fn intro_phrases(emotion: EmotionLabel) -> &'static [&'static str] {
    match emotion {
        EmotionLabel::Happy => &[
            "Let's amplify that great mood! How about:",
            "Wonderful to hear you're feeling good. I've got some suggestions that might match your vibe:",
            "That positive energy is contagious! Would any of these enhance your day:",
        ],
        EmotionLabel::Sad => &[
            "I understand you're feeling down. These might provide some comfort:",
            "When you're feeling sad, sometimes these can help:",
            "I've got some gentle suggestions that might meet you where you are:",
        ],
        EmotionLabel::Stressed => &[
            "I notice you're feeling stressed. These might help you unwind:",
            "Let's find something to help release some of that tension. How about:",
            "When stress is high, these options might offer some relief:",
        ],
        EmotionLabel::Calm => &[
            "To complement your peaceful state, you might enjoy:",
            "These selections could enhance your calm energy:",
            "Since you're feeling centered, perhaps one of these would resonate:",
        ],
        EmotionLabel::Excited => &[
            "With all that energy, you might enjoy:",
            "Channel that excitement with one of these options:",
            "To match your enthusiastic state, how about:",
        ],
        EmotionLabel::Neutral => &[
            "I've got some balanced options that might interest you:",
            "Since you're in a neutral space, perhaps one of these would be welcome:",
            "Here are some suggestions that could enhance your current state:",
        ],
    }
}

/// The fixed three-item catalog list for an emotion.
///
/// Every label has a defined list; the closed enum makes a missing entry
/// unrepresentable.
#[must_use]
pub fn recommendations_for(emotion: EmotionLabel) -> &'static [ContentItem] {
    match emotion {
        EmotionLabel::Happy => &HAPPY_ITEMS,
        EmotionLabel::Sad => &SAD_ITEMS,
        EmotionLabel::Stressed => &STRESSED_ITEMS,
        EmotionLabel::Calm => &CALM_ITEMS,
        EmotionLabel::Excited => &EXCITED_ITEMS,
        EmotionLabel::Neutral => &NEUTRAL_ITEMS,
    }
}

/// Catalog items for an emotion, filtered by category.
#[must_use]
pub fn recommendations_by_category(
    emotion: EmotionLabel,
    category: ContentCategory,
) -> Vec<ContentItem> {
    recommendations_for(emotion)
        .iter()
        .filter(|item| item.category == category)
        .copied()
        .collect()
}

/// Pick an intro phrase for the emotion, uniformly at random.
pub fn intro_phrase_for<R: Rng>(emotion: EmotionLabel, rng: &mut R) -> &'static str {
    let phrases = intro_phrases(emotion);
    phrases[rng.gen_range(0..phrases.len())]
}

/// Build the spoken recommendation narrative for an emotion.
///
/// Concatenates an intro phrase with the first music, podcast, and
/// meditation items from the emotion's list, omitting any category that is
/// absent. Randomness is confined to the intro-phrase pick.
pub fn narrative_for<R: Rng>(emotion: EmotionLabel, rng: &mut R) -> String {
    let mut response = format!("{} ", intro_phrase_for(emotion, rng));

    let items = recommendations_for(emotion);
    if let Some(music) = items
        .iter()
        .find(|i| i.category == ContentCategory::Music)
    {
        response.push_str(&format!("A \"{}\" playlist, ", music.title));
    }
    if let Some(podcast) = items
        .iter()
        .find(|i| i.category == ContentCategory::Podcast)
    {
        response.push_str(&format!("the \"{}\" podcast, ", podcast.title));
    }
    if let Some(meditation) = items
        .iter()
        .find(|i| i.category == ContentCategory::Meditation)
    {
        match meditation.duration {
            Some(duration) => {
                response.push_str(&format!("or a {duration} \"{}\" meditation.", meditation.title));
            }
            None => {
                response.push_str(&format!("or a \"{}\" meditation.", meditation.title));
            }
        }
    }

    response
}
