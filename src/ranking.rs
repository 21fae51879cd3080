use crate::models::RankedScore;

pub const TOP_K: usize = 3;

/// The three highest scores seen so far, best first.
///
/// Slots start at score 0 with an empty ID and are only replaced by strictly
/// greater scores, so the first student to reach a score keeps the place.
#[derive(Debug, Clone, PartialEq)]
pub struct TopThree {
    slots: [RankedScore; TOP_K],
}

impl Default for TopThree {
    fn default() -> Self {
        let empty = || RankedScore {
            score: 0.0,
            student_id: String::new(),
        };
        Self {
            slots: [empty(), empty(), empty()],
        }
    }
}

impl TopThree {
    pub fn offer(&mut self, score: f64, student_id: &str) {
        let entry = RankedScore {
            score,
            student_id: student_id.to_string(),
        };
        if score > self.slots[0].score {
            self.slots.rotate_right(1);
            self.slots[0] = entry;
        } else if score > self.slots[1].score {
            self.slots[1..].rotate_right(1);
            self.slots[1] = entry;
        } else if score > self.slots[2].score {
            self.slots[2] = entry;
        }
    }

    pub fn entries(&self) -> &[RankedScore; TOP_K] {
        &self.slots
    }
}
