use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Photo {
    pub id: String,
    pub file: String,
    pub title: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<u16>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    pub id: String,
    pub name: String,
    pub description: String,
    /// Travel time from the start of the journey.
    pub distance_hours: u32,
    #[serde(default)]
    pub is_flight: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wish {
    pub from: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardCover {
    pub title: String,
    pub subtitle: String,
    pub photo_id: String,
}

/// Everything the card shows: photos, the journey, the wishes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentPack {
    pub id: String,
    pub title: String,
    pub description: String,
    pub version: String,
    pub cover: CardCover,
    pub photos: Vec<Photo>,
    /// First one present in `photos` becomes the puzzle image.
    pub puzzle_photo_ids: Vec<String>,
    pub card_photo_ids: Vec<String>,
    pub waypoints: Vec<Waypoint>,
    pub wishes: Vec<Wish>,
}

impl ContentPack {
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.photos.is_empty() {
            errors.push("Content pack has no photos".to_string());
        }

        let mut photo_ids = HashSet::new();
        for photo in &self.photos {
            if !photo_ids.insert(photo.id.as_str()) {
                errors.push(format!("Duplicate photo ID: '{}'", photo.id));
            }
        }

        for id in self.card_photo_ids.iter().chain(std::iter::once(&self.cover.photo_id)) {
            if !photo_ids.contains(id.as_str()) {
                errors.push(format!("Unknown photo ID referenced: '{}'", id));
            }
        }

        if self.waypoints.len() < 2 {
            errors.push("Journey needs at least two waypoints".to_string());
        }

        let mut waypoint_ids = HashSet::new();
        for waypoint in &self.waypoints {
            if !waypoint_ids.insert(waypoint.id.as_str()) {
                errors.push(format!("Duplicate waypoint ID: '{}'", waypoint.id));
            }
        }

        if self.wishes.is_empty() {
            errors.push("Card needs at least one wish".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    pub fn catalog<P: AsRef<Path>>(&self, photos_dir: P) -> PhotoCatalog {
        PhotoCatalog::new(self.photos.clone(), photos_dir)
    }
}

/// Ordered photo records plus the directory their files live in.
#[derive(Debug, Clone)]
pub struct PhotoCatalog {
    photos: Vec<Photo>,
    photos_dir: PathBuf,
}

impl PhotoCatalog {
    pub fn new<P: AsRef<Path>>(photos: Vec<Photo>, photos_dir: P) -> Self {
        Self {
            photos,
            photos_dir: photos_dir.as_ref().to_path_buf(),
        }
    }

    pub fn photo(&self, id: &str) -> Option<&Photo> {
        self.photos.iter().find(|photo| photo.id == id)
    }

    /// Location of a photo's file, or an empty string when the id is unknown.
    pub fn get(&self, id: &str) -> String {
        self.photo(id)
            .map(|photo| self.url_for(photo))
            .unwrap_or_default()
    }

    pub fn url_for(&self, photo: &Photo) -> String {
        self.photos_dir.join(&photo.file).to_string_lossy().into_owned()
    }

    pub fn filter<P>(&self, predicate: P) -> Vec<&Photo>
    where
        P: Fn(&Photo) -> bool,
    {
        self.photos.iter().filter(|photo| predicate(photo)).collect()
    }

    /// First catalog photo among the candidates, else the first photo.
    pub fn puzzle_photo(&self, candidate_ids: &[String]) -> Option<&Photo> {
        self.photos
            .iter()
            .find(|photo| candidate_ids.contains(&photo.id))
            .or_else(|| self.photos.first())
    }

    /// Card photos in catalog order, not in the order the ids were listed.
    pub fn card_photos(&self, ids: &[String]) -> Vec<&Photo> {
        self.filter(|photo| ids.contains(&photo.id))
    }

    /// Dated photos, oldest first.
    pub fn journey_photos(&self) -> Vec<&Photo> {
        let mut dated = self.filter(|photo| photo.year.is_some());
        dated.sort_by_key(|photo| photo.year);
        dated
    }

    pub fn len(&self) -> usize {
        self.photos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.photos.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::default_pack;
    use pretty_assertions::assert_eq;

    fn photo(id: &str, year: Option<u16>) -> Photo {
        Photo {
            id: id.to_string(),
            file: format!("{}.jpg", id),
            title: id.to_uppercase(),
            description: String::new(),
            year,
        }
    }

    #[test]
    fn test_default_pack_is_valid() {
        assert!(default_pack().validate().is_ok());
    }

    #[test]
    fn test_validation_reports_problems() {
        let mut pack = default_pack();
        pack.photos.push(pack.photos[0].clone());
        pack.card_photo_ids.push("missing".to_string());
        pack.waypoints.truncate(1);
        pack.wishes.clear();

        let errors = pack.validate().unwrap_err();
        assert_eq!(errors.len(), 4);
    }

    #[test]
    fn test_get_falls_back_to_empty_url() {
        let catalog = PhotoCatalog::new(vec![photo("a", None)], "photos");
        assert_eq!(catalog.get("a"), Path::new("photos").join("a.jpg").to_string_lossy());
        assert_eq!(catalog.get("nope"), "");
    }

    #[test]
    fn test_puzzle_photo_selection() {
        let catalog = PhotoCatalog::new(vec![photo("a", None), photo("b", None), photo("c", None)], "");

        let ids = vec!["c".to_string(), "b".to_string()];
        assert_eq!(catalog.puzzle_photo(&ids).unwrap().id, "b");

        let none = vec!["zzz".to_string()];
        assert_eq!(catalog.puzzle_photo(&none).unwrap().id, "a");
    }

    #[test]
    fn test_card_photos_keep_catalog_order() {
        let catalog = PhotoCatalog::new(vec![photo("a", None), photo("b", None), photo("c", None)], "");
        let ids = vec!["c".to_string(), "a".to_string()];
        let ids: Vec<&str> = catalog.card_photos(&ids).iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "c"]);
    }

    #[test]
    fn test_journey_photos_sorted_by_year() {
        let catalog = PhotoCatalog::new(
            vec![photo("late", Some(2022)), photo("undated", None), photo("early", Some(2005))],
            "",
        );
        let ids: Vec<&str> = catalog.journey_photos().iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["early", "late"]);
    }
}
