use rand::Rng;

const BASE_ANGLES: [f32; 7] = [-10.0, -5.0, 0.0, 5.0, 10.0, 15.0, -15.0];
const BASE_XS: [f32; 7] = [-80.0, -40.0, 0.0, 40.0, 80.0, 120.0, -120.0];
const BASE_YS: [f32; 7] = [30.0, 10.0, 0.0, 10.0, 30.0, 50.0, 50.0];

const STACK_OFFSET: f32 = 12.0;
const ROTATION_RANGE: f32 = 8.0;

/// Visual offset of a card below the top of the stack.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CardOffset {
    pub rotate: f32,
    pub x: f32,
    pub y: f32,
}

impl CardOffset {
    pub const NEUTRAL: CardOffset = CardOffset { rotate: 0.0, x: 0.0, y: 0.0 };
}

/// Scattered layout for the swipe screen. Index 0 is the top card and is
/// always neutral.
pub fn random_layout<R: Rng + ?Sized>(count: usize, rng: &mut R) -> Vec<CardOffset> {
    (0..count)
        .map(|i| {
            if i == 0 {
                return CardOffset::NEUTRAL;
            }
            let slot = i % BASE_ANGLES.len();
            CardOffset {
                rotate: BASE_ANGLES[slot] + rng.gen_range(-0.5f32..0.5) * 8.0,
                x: BASE_XS[slot] + rng.gen_range(-0.5f32..0.5) * 30.0,
                y: BASE_YS[slot] + rng.gen_range(-0.5f32..0.5) * 20.0,
            }
        })
        .collect()
}

/// Tidy fanned layout for the card hub: deeper cards shift down-right.
pub fn hub_layout<R: Rng + ?Sized>(count: usize, rng: &mut R) -> Vec<CardOffset> {
    (0..count)
        .map(|i| CardOffset {
            rotate: rng.gen_range(-0.5f32..0.5) * ROTATION_RANGE,
            x: i as f32 * STACK_OFFSET * 0.8,
            y: i as f32 * STACK_OFFSET * 0.6,
        })
        .collect()
}

/// Shrink factor for the card `depth` positions below the top.
pub fn depth_scale(depth: usize) -> f32 {
    (1.0 - depth as f32 * 0.025).max(0.5)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchGrade {
    Bad,
    Okay,
    Good,
}

impl MatchGrade {
    pub fn label(&self) -> &'static str {
        match self {
            MatchGrade::Bad => "Bad Match",
            MatchGrade::Okay => "Okay Match",
            MatchGrade::Good => "Good Match",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchScore {
    pub percent: u8,
    pub grade: MatchGrade,
}

/// Decorative match badge. Pure function of the seed text, so a card keeps
/// its badge across redraws; it carries no ranking meaning.
pub fn match_score(seed_text: &str) -> MatchScore {
    let seed = seed_text
        .chars()
        .fold(0u32, |acc, c| acc.wrapping_add(c as u32));
    let percent = 50 + (50.0 * (seed as f64).sin().abs()).floor() as u8;
    let grade = if percent < 60 {
        MatchGrade::Bad
    } else if percent < 80 {
        MatchGrade::Okay
    } else {
        MatchGrade::Good
    };
    MatchScore { percent, grade }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_random_layout_top_card_is_neutral() {
        let mut rng = StdRng::seed_from_u64(7);
        let layout = random_layout(9, &mut rng);
        assert_eq!(layout.len(), 9);
        assert_eq!(layout[0], CardOffset::NEUTRAL);
    }

    #[test]
    fn test_random_layout_stays_near_base_slots() {
        let mut rng = StdRng::seed_from_u64(42);
        let layout = random_layout(14, &mut rng);
        for (i, offset) in layout.iter().enumerate().skip(1) {
            let slot = i % 7;
            assert!((offset.rotate - BASE_ANGLES[slot]).abs() <= 4.001);
            assert!((offset.x - BASE_XS[slot]).abs() <= 15.001);
            assert!((offset.y - BASE_YS[slot]).abs() <= 10.001);
        }
    }

    #[test]
    fn test_random_layout_empty() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(random_layout(0, &mut rng).is_empty());
    }

    #[test]
    fn test_hub_layout_fans_out() {
        let mut rng = StdRng::seed_from_u64(3);
        let layout = hub_layout(4, &mut rng);
        assert_eq!(layout.len(), 4);
        assert_eq!(layout[0].x, 0.0);
        assert!(layout[2].x > layout[1].x);
        assert!(layout[3].y > layout[2].y);
        assert!(layout.iter().all(|o| o.rotate.abs() <= 4.001));
    }

    #[test]
    fn test_depth_scale_shrinks_with_floor() {
        assert_eq!(depth_scale(0), 1.0);
        assert!(depth_scale(3) < depth_scale(1));
        assert_eq!(depth_scale(100), 0.5);
    }

    #[test]
    fn test_match_score_is_stable_and_bounded() {
        let a = match_score("Senior Frontend Developer");
        let b = match_score("Senior Frontend Developer");
        assert_eq!(a, b);
        assert!((50..=100).contains(&a.percent));
    }

    #[test]
    fn test_match_score_grades() {
        // "" has seed 0, sin(0) = 0
        let empty = match_score("");
        assert_eq!(empty.percent, 50);
        assert_eq!(empty.grade, MatchGrade::Bad);

        for text in ["Data Scientist", "iOS Developer", "Alex Johnson", "Sam Chen"] {
            let score = match_score(text);
            let expected = match score.percent {
                0..=59 => MatchGrade::Bad,
                60..=79 => MatchGrade::Okay,
                _ => MatchGrade::Good,
            };
            assert_eq!(score.grade, expected);
        }
    }

    #[test]
    fn test_match_score_long_wide_text() {
        let text = "\u{10FFFF}".repeat(4000);
        let score = match_score(&text);
        assert!((50..=100).contains(&score.percent));
        assert_eq!(score, match_score(&text));
    }
}
