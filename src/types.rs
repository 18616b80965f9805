use serde::{Deserialize, Serialize};

pub type CategoryId = i64;
pub type PointId = i64;

/// A picker value that is either still unset or holds the user's choice
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Selection<T> {
    #[default]
    Unselected,
    Selected(T),
}

impl<T> Selection<T> {
    pub fn as_selected(&self) -> Option<&T> {
        match self {
            Selection::Selected(value) => Some(value),
            Selection::Unselected => None,
        }
    }

    pub fn is_selected(&self) -> bool {
        matches!(self, Selection::Selected(_))
    }
}

/// State code as returned by the region lookup service
#[derive(Debug, Clone, Deserialize)]
pub struct StateRecord {
    #[serde(rename = "sigla", alias = "code")]
    pub code: String,
}

/// City as returned by the region lookup service
#[derive(Debug, Clone, Deserialize)]
pub struct CityRecord {
    #[serde(rename = "nome", alias = "name")]
    pub name: String,
}

/// A recyclable material type a collection point accepts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub title: String,
    #[serde(alias = "imageUrl")]
    pub image_url: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// A physical drop-off location listed on the map
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionPoint {
    pub id: PointId,
    pub name: String,
    #[serde(alias = "imageUrl")]
    pub image_url: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl CollectionPoint {
    pub fn coordinates(&self) -> Coordinates {
        Coordinates {
            latitude: self.latitude,
            longitude: self.longitude,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointContact {
    pub name: String,
    #[serde(alias = "imageUrl")]
    pub image_url: String,
    pub email: String,
    pub whatsapp: String,
    pub city: String,
    #[serde(rename = "uf", alias = "stateCode")]
    pub state_code: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTitle {
    pub title: String,
}

/// Full record of a single collection point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointDetail {
    #[serde(rename = "serializedPoint", alias = "point")]
    pub point: PointContact,
    #[serde(rename = "items", default)]
    pub categories: Vec<CategoryTitle>,
}

impl PointDetail {
    /// Category titles in backend order, comma separated
    pub fn categories_label(&self) -> String {
        self.categories
            .iter()
            .map(|c| c.title.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}
