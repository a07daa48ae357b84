//! Media group operations
//!
//! Groups hold an ordered set of media ids. Detail views resolve the ids to
//! full records; ids pointing at deleted media are skipped silently.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use signcast_common::types::{Group, Media};
use signcast_common::{Error, Result};
use uuid::Uuid;

use super::core::{Store, StoreInner};

/// Group create/update payload. `PUT` on a group id upserts: absent groups
/// are created under that id.
#[derive(Debug, Clone, Deserialize)]
pub struct GroupUpsert {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub cover_image: Option<String>,
    #[serde(default)]
    pub media_ids: Vec<Uuid>,
}

/// A group joined with its resolved media records
#[derive(Debug, Clone, Serialize)]
pub struct GroupDetail {
    #[serde(flatten)]
    pub group: Group,
    pub media: Vec<Media>,
}

fn resolve(inner: &StoreInner, group: &Group) -> GroupDetail {
    let media = group
        .media_ids
        .iter()
        .filter_map(|id| inner.media.iter().find(|m| m.id == *id).cloned())
        .collect();
    GroupDetail {
        group: group.clone(),
        media,
    }
}

impl Store {
    pub async fn list_groups(&self) -> Vec<GroupDetail> {
        let inner = self.inner.read().await;
        inner.groups.iter().map(|g| resolve(&inner, g)).collect()
    }

    pub async fn get_group(&self, id: Uuid) -> Result<GroupDetail> {
        let inner = self.inner.read().await;
        inner
            .groups
            .iter()
            .find(|g| g.id == id)
            .map(|g| resolve(&inner, g))
            .ok_or_else(|| Error::NotFound(format!("group {}", id)))
    }

    pub async fn create_group(&self, upsert: GroupUpsert) -> Group {
        let now = Utc::now();
        let group = Group {
            id: Uuid::new_v4(),
            name: upsert.name,
            description: upsert.description,
            cover_image: upsert.cover_image,
            media_ids: upsert.media_ids,
            created_at: now,
            updated_at: now,
            view_count: None,
        };
        let mut inner = self.inner.write().await;
        inner.groups.push(group.clone());
        group
    }

    /// Update a group in place, or create it under the given id when absent
    pub async fn upsert_group(&self, id: Uuid, upsert: GroupUpsert) -> Group {
        let mut inner = self.inner.write().await;
        let now = Utc::now();

        if let Some(group) = inner.groups.iter_mut().find(|g| g.id == id) {
            group.name = upsert.name;
            group.description = upsert.description;
            group.cover_image = upsert.cover_image;
            group.media_ids = upsert.media_ids;
            group.updated_at = now;
            return group.clone();
        }

        let group = Group {
            id,
            name: upsert.name,
            description: upsert.description,
            cover_image: upsert.cover_image,
            media_ids: upsert.media_ids,
            created_at: now,
            updated_at: now,
            view_count: None,
        };
        inner.groups.push(group.clone());
        group
    }

    pub async fn delete_group(&self, id: Uuid) -> Result<()> {
        let mut inner = self.inner.write().await;
        let before = inner.groups.len();
        inner.groups.retain(|g| g.id != id);
        if inner.groups.len() == before {
            return Err(Error::NotFound(format!("group {}", id)));
        }
        Ok(())
    }
}
