//! Catalog vocabularies for courses and announcements.

use serde::{Deserialize, Serialize};

/// Study level of a course or scholarship.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CourseLevel {
    Foundation,
    Diploma,
    Undergraduate,
    Postgraduate,
    Doctorate,
}

impl CourseLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Foundation => "foundation",
            Self::Diploma => "diploma",
            Self::Undergraduate => "undergraduate",
            Self::Postgraduate => "postgraduate",
            Self::Doctorate => "doctorate",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "foundation" => Some(Self::Foundation),
            "diploma" => Some(Self::Diploma),
            "undergraduate" | "bachelor" | "bachelors" => Some(Self::Undergraduate),
            "postgraduate" | "master" | "masters" => Some(Self::Postgraduate),
            "doctorate" | "phd" => Some(Self::Doctorate),
            _ => None,
        }
    }
}

/// Kind of announcement shown on the site banner and news list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AnnouncementType {
    #[default]
    News,
    Update,
    Promotion,
    Alert,
}

impl AnnouncementType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::News => "news",
            Self::Update => "update",
            Self::Promotion => "promotion",
            Self::Alert => "alert",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "news" => Some(Self::News),
            "update" => Some(Self::Update),
            "promotion" => Some(Self::Promotion),
            "alert" => Some(Self::Alert),
            _ => None,
        }
    }
}
