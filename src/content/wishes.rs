use std::time::Duration;
use crate::content::Wish;

/// Rotates through the family wishes. Timed rotation is derived from how
/// long the card has been on screen, so dropping the carousel stops it.
#[derive(Debug, Clone)]
pub struct WishCarousel {
    wishes: Vec<Wish>,
    period: Duration,
    manual_steps: usize,
    timed_steps: u128,
}

impl WishCarousel {
    pub fn new(wishes: Vec<Wish>, period: Duration) -> Self {
        Self {
            wishes,
            period,
            manual_steps: 0,
            timed_steps: 0,
        }
    }

    /// Catches up with the timer. Returns true if the shown wish changed.
    pub fn advance_to(&mut self, elapsed: Duration) -> bool {
        if self.period.is_zero() || self.wishes.is_empty() {
            return false;
        }

        let before = self.current_index();
        self.timed_steps = elapsed.as_nanos() / self.period.as_nanos();
        before != self.current_index()
    }

    pub fn next(&mut self) -> Option<&Wish> {
        self.manual_steps += 1;
        self.current()
    }

    pub fn current_index(&self) -> usize {
        if self.wishes.is_empty() {
            return 0;
        }
        let len = self.wishes.len();
        let timed = (self.timed_steps % len as u128) as usize;
        (self.manual_steps % len + timed) % len
    }

    pub fn current(&self) -> Option<&Wish> {
        self.wishes.get(self.current_index())
    }

    pub fn len(&self) -> usize {
        self.wishes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.wishes.is_empty()
    }

    pub fn period(&self) -> Duration {
        self.period
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn carousel() -> WishCarousel {
        let wishes = ["son", "daughter", "kids"]
            .iter()
            .map(|from| Wish {
                from: from.to_string(),
                message: format!("from {}", from),
            })
            .collect();
        WishCarousel::new(wishes, Duration::from_secs(10))
    }

    #[test]
    fn test_manual_cycle_wraps() {
        let mut carousel = carousel();
        assert_eq!(carousel.current().unwrap().from, "son");
        assert_eq!(carousel.next().unwrap().from, "daughter");
        assert_eq!(carousel.next().unwrap().from, "kids");
        assert_eq!(carousel.next().unwrap().from, "son");
    }

    #[test]
    fn test_timed_rotation() {
        let mut carousel = carousel();

        assert!(!carousel.advance_to(Duration::from_secs(9)));
        assert_eq!(carousel.current_index(), 0);

        assert!(carousel.advance_to(Duration::from_secs(10)));
        assert_eq!(carousel.current_index(), 1);

        assert!(!carousel.advance_to(Duration::from_secs(15)));
        assert!(carousel.advance_to(Duration::from_secs(35)));
        assert_eq!(carousel.current_index(), 0);
    }

    #[test]
    fn test_manual_and_timed_steps_add_up() {
        let mut carousel = carousel();
        carousel.next();
        carousel.advance_to(Duration::from_secs(20));
        assert_eq!(carousel.current_index(), 0);
    }

    #[test]
    fn test_sub_millisecond_period() {
        let wishes = carousel().wishes;
        let mut carousel = WishCarousel::new(wishes, Duration::from_micros(500));

        assert!(carousel.advance_to(Duration::from_millis(1)));
        assert_eq!(carousel.current_index(), 2);
        assert!(carousel.advance_to(Duration::from_micros(1500)));
        assert_eq!(carousel.current_index(), 0);
    }

    #[test]
    fn test_empty_carousel() {
        let mut carousel = WishCarousel::new(Vec::new(), Duration::from_secs(10));
        assert!(carousel.current().is_none());
        assert!(!carousel.advance_to(Duration::from_secs(100)));
        assert!(carousel.next().is_none());
    }
}
