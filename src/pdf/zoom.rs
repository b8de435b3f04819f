const STEP: f32 = 0.25;
const MIN_STEPS: u8 = 2;
const MAX_STEPS: u8 = 12;
const DEFAULT_STEPS: u8 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ZoomLevel {
    steps: u8,
}

impl Default for ZoomLevel {
    fn default() -> Self {
        Self {
            steps: DEFAULT_STEPS,
        }
    }
}

impl ZoomLevel {
    pub fn scale(self) -> f32 {
        self.steps as f32 * STEP
    }

    pub fn percent(self) -> u32 {
        self.steps as u32 * 25
    }

    pub fn zoom_in(self) -> Self {
        Self {
            steps: (self.steps + 1).min(MAX_STEPS),
        }
    }

    pub fn zoom_out(self) -> Self {
        Self {
            steps: self.steps.saturating_sub(1).max(MIN_STEPS),
        }
    }

    pub fn can_zoom_in(self) -> bool {
        self.steps < MAX_STEPS
    }

    pub fn can_zoom_out(self) -> bool {
        self.steps > MIN_STEPS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_actual_size() {
        assert_eq!(ZoomLevel::default().scale(), 1.0);
        assert_eq!(ZoomLevel::default().percent(), 100);
    }

    #[test]
    fn test_zoom_is_clamped_in_both_directions() {
        let mut zoom = ZoomLevel::default();
        for _ in 0..50 {
            zoom = zoom.zoom_in();
            assert!(zoom.scale() <= 3.0);
        }
        assert_eq!(zoom.scale(), 3.0);
        assert!(!zoom.can_zoom_in());

        for _ in 0..50 {
            zoom = zoom.zoom_out();
            assert!(zoom.scale() >= 0.5);
        }
        assert_eq!(zoom.scale(), 0.5);
        assert!(!zoom.can_zoom_out());
    }

    #[test]
    fn test_mixed_sequence_stays_in_bounds() {
        let mut zoom = ZoomLevel::default();
        for i in 0..200u32 {
            zoom = if (i * 7) % 3 == 0 {
                zoom.zoom_out()
            } else {
                zoom.zoom_in()
            };
            assert!((0.5..=3.0).contains(&zoom.scale()));
        }
    }

    #[test]
    fn test_steps_are_fixed_increments() {
        let zoom = ZoomLevel::default().zoom_in();
        assert_eq!(zoom.scale(), 1.25);
        assert_eq!(zoom.zoom_out().zoom_out().scale(), 0.75);
    }
}
