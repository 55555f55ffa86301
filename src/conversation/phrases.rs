//! Phrase tables for the scripted check-in dialogue.
//!
//! Every per-emotion table defines an entry for every [`EmotionLabel`] —
//! the exhaustive `match` makes a missing entry a compile error, so adding
//! an emotion forces every table to be extended together.

use crate::emotion::EmotionLabel;

/// Opening greetings, picked at random when a session starts.
pub(crate) const GREETINGS: [&str; 3] = [
    "Hey there! How's your heart feeling today?",
    "Hello! I'm here to check in. How are you doing right now?",
    "Hi! It's good to connect with you. How are you feeling today?",
];

/// Fixed prompt that invites the free-form utterance.
pub(crate) const INITIAL_QUESTION: &str = "Tell me about your day in a few words.";

/// Fixed prompt when the user disagrees with the detected emotion.
pub(crate) const DESCRIBE_FEELING_PROMPT: &str =
    "I see. How would you describe how you're feeling right now?";

/// Fixed farewell when the user declines recommendations.
pub(crate) const FAREWELL_PROMPT: &str = "Thank you for sharing with me today. \
     Is there anything else on your mind before we finish our check-in?";

/// Conversational acknowledgements of a detected emotion.
pub(crate) fn responses(emotion: EmotionLabel) -> &'static [&'static str] {
    match emotion {
        EmotionLabel::Neutral => &[
            "How is your day going so far?",
            "What's been on your mind lately?",
            "Tell me more about how you're feeling right now.",
        ],
        EmotionLabel::Happy => &[
            "You sound joyful! What's brought this happiness to your day?",
            "It's wonderful to hear that positive tone! What's making you feel this way?",
            "I notice some cheerfulness in your voice. Want to share what's going well?",
        ],
        EmotionLabel::Sad => &[
            "I'm sensing some heaviness in your voice. Would you like to talk about what's troubling you?",
            "You sound a bit down. Is there something specific that's weighing on your mind?",
            "It seems like you might be feeling sad. Would taking a few deep breaths together help?",
        ],
        EmotionLabel::Stressed => &[
            "I'm noticing tension in your voice. Would you like to take a deep breath together?",
            "You sound a bit stressed. Is there something specific that's causing pressure right now?",
            "I can hear that you're carrying some stress. What might help you feel more at ease?",
        ],
        EmotionLabel::Calm => &[
            "You have a peaceful quality to your voice today. What's contributing to this sense of calm?",
            "I'm picking up on a relaxed energy from you. Has something helped you find this balance?",
            "Your voice has a grounded quality to it. What practices have been helping you stay centered?",
        ],
        EmotionLabel::Excited => &[
            "There's definitely excitement in your voice! What's got you feeling so energized?",
            "I can hear your enthusiasm! What are you looking forward to right now?",
            "Your voice is full of energy today! What's sparking this excitement?",
        ],
    }
}

/// Deeper follow-up questions per emotion.
pub(crate) fn follow_ups(emotion: EmotionLabel) -> &'static [&'static str] {
    match emotion {
        EmotionLabel::Neutral => &[
            "Would you like to explore what might help you connect more with your feelings?",
            "Is there something specific you'd like to focus on in our conversation today?",
            "Sometimes a neutral state is exactly what we need. How are you experiencing this moment?",
        ],
        EmotionLabel::Happy => &[
            "That's wonderful to hear! How could you carry this positive energy forward in your day?",
            "Joy is such a gift. Is there a way you could share some of this happiness with someone else today?",
            "I'm glad you're feeling good! What helps you sustain this positive feeling when challenges arise?",
        ],
        EmotionLabel::Sad => &[
            "I appreciate you sharing that with me. What's one small thing that might bring you a moment of comfort right now?",
            "That sounds difficult. Is there someone in your life who could offer support during this time?",
            "Sometimes sadness needs space to be felt. Would you like to sit quietly together for a moment?",
        ],
        EmotionLabel::Stressed => &[
            "Let's take a deep breath together. Inhale slowly for 4 counts, hold for 2, and exhale for 6. How did that feel?",
            "Stress can be overwhelming. What's one small task you could take off your plate today?",
            "When you're feeling stressed like this, what has helped you in the past?",
        ],
        EmotionLabel::Calm => &[
            "That sense of calm is precious. What practices help you maintain this balanced state?",
            "It's wonderful that you're feeling centered. How might you create more moments like this in your day?",
            "Calmness often gives us clarity. Is there any insight or wisdom that's present for you right now?",
        ],
        EmotionLabel::Excited => &[
            "Your enthusiasm is contagious! How are you channeling this energy in a positive direction?",
            "Excitement can be so motivating! What are you most looking forward to about this?",
            "That vibrant energy is wonderful! How does this excitement feel in your body right now?",
        ],
    }
}

/// Confirmation questions asking the user to verify the detected emotion.
pub(crate) fn confirmations(emotion: EmotionLabel) -> &'static [&'static str] {
    match emotion {
        EmotionLabel::Neutral => &[
            "It seems like you're feeling pretty neutral right now. Does that sound right?",
            "I'm sensing a balanced state from you today. Would you say that's accurate?",
            "You seem to be in an even place emotionally. Is that how you'd describe it?",
        ],
        EmotionLabel::Happy => &[
            "You sound like you're in a happy place right now. Did I get that right?",
            "I'm picking up on joy in your voice. Is that how you're feeling?",
            "There seems to be a positive energy about you today. Would you say you're feeling happy?",
        ],
        EmotionLabel::Sad => &[
            "I sense some sadness in your voice. Is that what you're experiencing?",
            "You seem to be feeling down right now. Is that accurate?",
            "I'm hearing a touch of sadness in how you're expressing yourself. Does that resonate with you?",
        ],
        EmotionLabel::Stressed => &[
            "I'm noticing signs of stress in your voice. Is that what you're feeling?",
            "You sound like you might be under some pressure right now. Is that right?",
            "There's a tension I'm picking up on. Would you say you're feeling stressed?",
        ],
        EmotionLabel::Calm => &[
            "You have a peaceful quality about you right now. Would you say you're feeling calm?",
            "I sense a grounded energy from you today. Does that match how you're feeling?",
            "There's a tranquility in your voice. Are you experiencing a sense of calm?",
        ],
        EmotionLabel::Excited => &[
            "I hear enthusiasm in your voice! Are you feeling excited about something?",
            "There's an energetic quality to how you're speaking. Would you say you're excited right now?",
            "You seem to have an upbeat energy today. Is excitement what you're feeling?",
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_table_has_three_entries_per_emotion() {
        for emotion in EmotionLabel::ALL {
            assert_eq!(responses(emotion).len(), 3, "responses/{emotion}");
            assert_eq!(follow_ups(emotion).len(), 3, "follow_ups/{emotion}");
            assert_eq!(confirmations(emotion).len(), 3, "confirmations/{emotion}");
        }
        assert_eq!(GREETINGS.len(), 3);
    }

    #[test]
    fn fixed_prompts_are_nonempty() {
        assert!(!INITIAL_QUESTION.is_empty());
        assert!(!DESCRIBE_FEELING_PROMPT.is_empty());
        assert!(!FAREWELL_PROMPT.is_empty());
    }
}
