//! Upstream entities: characters, locations and the pagination envelope

use serde::{Deserialize, Serialize};

/// Name/url pair used for a character's origin and current location
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlaceRef {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub url: String,
}

/// A character as returned by the upstream API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Character {
    pub id: i64,
    pub name: String,
    pub status: String,
    pub species: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    pub gender: String,
    pub origin: PlaceRef,
    pub location: PlaceRef,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub episode: Vec<String>,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub created: String,
}

impl Character {
    /// Flattened text used to compute the character's embedding
    ///
    /// Fields appear in a fixed order as `Label: value`, joined by `". "`.
    /// `Type` is omitted when empty.
    pub fn description(&self) -> String {
        let mut parts = vec![
            format!("Name: {}", self.name),
            format!("Status: {}", self.status),
            format!("Species: {}", self.species),
        ];

        if !self.kind.is_empty() {
            parts.push(format!("Type: {}", self.kind));
        }

        parts.push(format!("Gender: {}", self.gender));
        parts.push(format!("Origin: {}", self.origin.name));
        parts.push(format!("Current Location: {}", self.location.name));

        parts.join(". ")
    }
}

/// A location as returned by the upstream API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub id: i64,
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub dimension: String,
    #[serde(default)]
    pub residents: Vec<String>,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub created: String,
    /// Full resident records, populated only on request
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub residents_details: Option<Vec<Character>>,
}

impl Location {
    pub fn resident_count(&self) -> usize {
        self.residents.len()
    }

    /// Character ids parsed from the trailing segment of each resident URL
    ///
    /// URLs without a numeric trailing segment are skipped.
    pub fn resident_ids(&self) -> Vec<i64> {
        self.residents
            .iter()
            .filter_map(|url| url.trim_end_matches('/').rsplit('/').next())
            .filter_map(|segment| segment.parse().ok())
            .collect()
    }

    /// Returns a copy with resident details attached
    pub fn with_residents(mut self, residents: Vec<Character>) -> Self {
        self.residents_details = Some(residents);
        self
    }
}

/// Pagination metadata of an upstream collection page
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PageInfo {
    #[serde(default)]
    pub count: Option<u64>,
    #[serde(default)]
    pub pages: Option<u64>,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub prev: Option<String>,
}

/// Envelope wrapping one page of an upstream collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub info: PageInfo,
    pub results: Vec<T>,
}

impl<T> Page<T> {
    pub fn has_next(&self) -> bool {
        self.info.next.is_some()
    }
}

/// Multi-id responses: a bare object for one id, an array otherwise
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

impl<T> OneOrMany<T> {
    pub fn into_vec(self) -> Vec<T> {
        match self {
            Self::Many(items) => items,
            Self::One(item) => vec![item],
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_description_without_type() {
        let character = fixtures::character(1, "Rick Sanchez");

        assert_eq!(
            character.description(),
            "Name: Rick Sanchez. Status: Alive. Species: Human. Gender: Male. \
             Origin: Earth (C-137). Current Location: Citadel of Ricks"
        );
    }

    #[test]
    fn test_description_with_type() {
        let mut character = fixtures::character(2, "Squanchy");
        character.kind = "Cat-Person".to_string();

        let description = character.description();
        assert!(description.contains("Species: Human. Type: Cat-Person. Gender: Male"));
    }

    #[test]
    fn test_character_deserializes_upstream_shape() {
        let json = serde_json::json!({
            "id": 1,
            "name": "Rick Sanchez",
            "status": "Alive",
            "species": "Human",
            "type": "",
            "gender": "Male",
            "origin": {"name": "Earth (C-137)", "url": "https://rickandmortyapi.com/api/location/1"},
            "location": {"name": "Citadel of Ricks", "url": "https://rickandmortyapi.com/api/location/3"},
            "image": "https://rickandmortyapi.com/api/character/avatar/1.jpeg",
            "episode": ["https://rickandmortyapi.com/api/episode/1"],
            "url": "https://rickandmortyapi.com/api/character/1",
            "created": "2017-11-04T18:48:46.250Z"
        });

        let character: Character = serde_json::from_value(json).unwrap();
        assert_eq!(character.id, 1);
        assert_eq!(character.location.name, "Citadel of Ricks");
        assert_eq!(character.episode.len(), 1);
    }

    #[test]
    fn test_character_serializes_type_field() {
        let json = serde_json::to_value(fixtures::character(1, "Rick")).unwrap();
        assert!(json.get("type").is_some());
        assert!(json.get("kind").is_none());
    }

    #[test]
    fn test_resident_ids() {
        let mut location = fixtures::location(1, "Earth", &[1, 38]);
        location.residents.push("https://rickandmortyapi.com/api/character/".to_string());

        assert_eq!(location.resident_ids(), vec![1, 38]);
        assert_eq!(location.resident_count(), 3);
    }

    #[test]
    fn test_location_omits_missing_resident_details() {
        let json = serde_json::to_value(fixtures::location(1, "Earth", &[1])).unwrap();
        assert!(json.get("residents_details").is_none());

        let with = fixtures::location(1, "Earth", &[1])
            .with_residents(vec![fixtures::character(1, "Rick")]);
        let json = serde_json::to_value(with).unwrap();
        assert_eq!(json["residents_details"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn test_one_or_many_normalizes_both_shapes() {
        let one: OneOrMany<Character> =
            serde_json::from_value(fixtures::character_json(1, "Rick")).unwrap();
        assert_eq!(one.into_vec().len(), 1);

        let many: OneOrMany<Character> = serde_json::from_value(serde_json::json!([
            fixtures::character_json(1, "Rick"),
            fixtures::character_json(2, "Morty"),
        ]))
        .unwrap();
        assert_eq!(many.into_vec().len(), 2);
    }

    #[test]
    fn test_page_has_next() {
        let page: Page<Character> = serde_json::from_value(serde_json::json!({
            "info": {"count": 2, "pages": 2, "next": "https://rickandmortyapi.com/api/character?page=2", "prev": null},
            "results": [fixtures::character_json(1, "Rick")]
        }))
        .unwrap();

        assert!(page.has_next());
        assert_eq!(page.results.len(), 1);
    }
}
