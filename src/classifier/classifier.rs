use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::config::JawClassifierConfig;
use crate::helper::jaw_geometry::compute_jaw_angle;
use crate::utils::coordinate::{FrameSize, LandmarkSet};

/// Discrete jawline definition category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JawLevel {
    BladeMax,
    Medium,
    Tomato,
    Undetected,
}

impl JawLevel {
    /// label returns the canonical textual identifier of the category.
    ///
    /// Downstream presentation matches on these strings as substrings to
    /// pick a visual style, so they are fixed verbatim.
    pub fn label(&self) -> &'static str {
        match self {
            JawLevel::BladeMax => "Blade/Max",
            JawLevel::Medium => "Medium",
            JawLevel::Tomato => "Tomato",
            JawLevel::Undetected => "Undetected",
        }
    }

    /// marker returns the decorative display marker carried by two of
    /// the positive categories.
    pub fn marker(&self) -> Option<&'static str> {
        match self {
            JawLevel::BladeMax => Some("\u{2694}\u{FE0F}"),
            JawLevel::Tomato => Some("\u{1F345}"),
            _ => None,
        }
    }

    /// display_label returns the label with its marker appended, the way
    /// the category is shown to an end user.
    pub fn display_label(&self) -> String {
        match self.marker() {
            Some(marker) => format!("{} {}", self.label(), marker),
            None => self.label().to_string(),
        }
    }
}

impl fmt::Display for JawLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Outcome of one analysis call.
///
/// `angle` is present when the geometric path measured one, `explanation`
/// when the generative path produced a free-text rating.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JawAssessment {
    pub level: JawLevel,
    pub angle: Option<f32>,
    pub explanation: Option<String>,
}

impl JawAssessment {
    pub fn undetected() -> Self {
        JawAssessment {
            level: JawLevel::Undetected,
            angle: None,
            explanation: None,
        }
    }
}

/// Maps a detected landmark set (or its absence) to a jaw level by the
/// fixed angle threshold table.
#[derive(Debug, Clone)]
pub struct JawClassifier {
    pub chin_index: usize,
    pub jaw_corner_index: usize,
    pub ear_corner_index: usize,
    pub threshold_blade_max: f32,
    pub threshold_medium: f32,
}

impl JawClassifier {
    pub fn new(config: JawClassifierConfig) -> Self {
        JawClassifier {
            chin_index: config.chin_index,
            jaw_corner_index: config.jaw_corner_index,
            ear_corner_index: config.ear_corner_index,
            threshold_blade_max: config.threshold_blade_max,
            threshold_medium: config.threshold_medium,
        }
    }

    /// classify maps the detector output for one image to a jaw level.
    ///
    /// Absent landmarks, a set without the required indices, and a
    /// degenerate vertex all collapse to `Undetected`; this function
    /// never fails. It is pure: the same input always produces the same
    /// assessment.
    ///
    /// # Arguments
    /// * `landmarks` - normalized landmark set, or `None` when no face was detected
    /// * `frame` - pixel dimensions of the source image
    ///
    /// # Returns
    /// * `JawAssessment`
    pub fn classify(&self, landmarks: Option<&LandmarkSet>, frame: FrameSize) -> JawAssessment {
        let lmks = match landmarks {
            None => return JawAssessment::undetected(),
            Some(lmks) => lmks,
        };

        let chin = lmks.to_pixel(self.chin_index, frame);
        let jaw_corner = lmks.to_pixel(self.jaw_corner_index, frame);
        let ear_corner = lmks.to_pixel(self.ear_corner_index, frame);
        let (chin, jaw_corner, ear_corner) = match (chin, jaw_corner, ear_corner) {
            (Some(c), Some(j), Some(e)) => (c, j, e),
            _ => return JawAssessment::undetected(),
        };

        match compute_jaw_angle(chin, jaw_corner, ear_corner) {
            Ok(angle) => JawAssessment {
                level: self.level_for_angle(angle),
                angle: Some(angle),
                explanation: None,
            },
            Err(_) => JawAssessment::undetected(),
        }
    }

    /// level_for_angle applies the threshold table: inclusive upper
    /// bounds, evaluated in ascending order, first match wins.
    pub fn level_for_angle(&self, angle: f32) -> JawLevel {
        if angle <= self.threshold_blade_max {
            JawLevel::BladeMax
        } else if angle <= self.threshold_medium {
            JawLevel::Medium
        } else {
            JawLevel::Tomato
        }
    }
}
