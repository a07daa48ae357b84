//! Partnership pipeline operations
//!
//! **Responsibilities:**
//! - Partnership CRUD
//! - Stage transitions (`stage_updated_at` bookkeeping)
//! - Kanban board partition over the five pipeline stages
//! - Follow-up tasks attached to a partnership

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use signcast_common::types::{Partnership, PartnershipStage, PartnershipTask};
use signcast_common::{Error, Result};
use uuid::Uuid;

use super::core::Store;

/// Payload for opening a partnership record. New records enter the pipeline
/// at the analysis stage.
#[derive(Debug, Clone, Deserialize)]
pub struct NewPartnership {
    pub company_name: String,
    pub contact_name: String,
    pub contact_email: String,
    pub contact_phone: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub category: String,
    pub potential_screens: u32,
    #[serde(default)]
    pub notes: String,
    pub assigned_to: String,
}

/// Partial partnership update; stage changes go through `set_stage`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PartnershipUpdate {
    pub company_name: Option<String>,
    pub contact_name: Option<String>,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub category: Option<String>,
    pub potential_screens: Option<u32>,
    pub notes: Option<String>,
    pub assigned_to: Option<String>,
}

/// One kanban column in pipeline order
#[derive(Debug, Clone, Serialize)]
pub struct StageColumn {
    pub stage: PartnershipStage,
    pub label: &'static str,
    pub count: usize,
    pub partnerships: Vec<Partnership>,
}

/// Payload for attaching a follow-up task
#[derive(Debug, Clone, Deserialize)]
pub struct NewTask {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub due_date: DateTime<Utc>,
}

impl Store {
    pub async fn list_partnerships(&self) -> Vec<Partnership> {
        let inner = self.inner.read().await;
        inner.partnerships.clone()
    }

    pub async fn get_partnership(&self, id: Uuid) -> Result<Partnership> {
        let inner = self.inner.read().await;
        inner
            .partnerships
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or_else(|| Error::NotFound(format!("partnership {}", id)))
    }

    pub async fn create_partnership(&self, new: NewPartnership) -> Partnership {
        let now = Utc::now();
        let partnership = Partnership {
            id: Uuid::new_v4(),
            company_name: new.company_name,
            contact_name: new.contact_name,
            contact_email: new.contact_email,
            contact_phone: new.contact_phone,
            address: new.address,
            city: new.city,
            state: new.state.to_uppercase(),
            category: new.category,
            potential_screens: new.potential_screens,
            stage: PartnershipStage::Analysis,
            stage_updated_at: now,
            notes: new.notes,
            created_at: now,
            updated_at: now,
            assigned_to: new.assigned_to,
            tasks: Vec::new(),
        };
        let mut inner = self.inner.write().await;
        inner.partnerships.push(partnership.clone());
        partnership
    }

    pub async fn update_partnership(
        &self,
        id: Uuid,
        update: PartnershipUpdate,
    ) -> Result<Partnership> {
        let mut inner = self.inner.write().await;
        let partnership = inner.partnership_mut(id)?;

        if let Some(company_name) = update.company_name {
            partnership.company_name = company_name;
        }
        if let Some(contact_name) = update.contact_name {
            partnership.contact_name = contact_name;
        }
        if let Some(contact_email) = update.contact_email {
            partnership.contact_email = contact_email;
        }
        if let Some(contact_phone) = update.contact_phone {
            partnership.contact_phone = contact_phone;
        }
        if let Some(address) = update.address {
            partnership.address = address;
        }
        if let Some(city) = update.city {
            partnership.city = city;
        }
        if let Some(state) = update.state {
            partnership.state = state.to_uppercase();
        }
        if let Some(category) = update.category {
            partnership.category = category;
        }
        if let Some(potential_screens) = update.potential_screens {
            partnership.potential_screens = potential_screens;
        }
        if let Some(notes) = update.notes {
            partnership.notes = notes;
        }
        if let Some(assigned_to) = update.assigned_to {
            partnership.assigned_to = assigned_to;
        }
        partnership.updated_at = Utc::now();

        Ok(partnership.clone())
    }

    pub async fn delete_partnership(&self, id: Uuid) -> Result<()> {
        let mut inner = self.inner.write().await;
        let before = inner.partnerships.len();
        inner.partnerships.retain(|p| p.id != id);
        if inner.partnerships.len() == before {
            return Err(Error::NotFound(format!("partnership {}", id)));
        }
        Ok(())
    }

    /// Move a partnership to a pipeline stage. Returns the previous stage
    /// alongside the updated record. Setting the current stage again still
    /// touches the timestamps.
    pub async fn set_partnership_stage(
        &self,
        id: Uuid,
        stage: PartnershipStage,
    ) -> Result<(PartnershipStage, Partnership)> {
        let mut inner = self.inner.write().await;
        let partnership = inner.partnership_mut(id)?;

        let previous = partnership.stage;
        let now = Utc::now();
        partnership.stage = stage;
        partnership.stage_updated_at = now;
        partnership.updated_at = now;

        Ok((previous, partnership.clone()))
    }

    /// Partition all partnerships into the five stage columns, pipeline order
    pub async fn partnership_board(&self) -> Vec<StageColumn> {
        let inner = self.inner.read().await;
        PartnershipStage::ALL
            .iter()
            .map(|stage| {
                let partnerships: Vec<Partnership> = inner
                    .partnerships
                    .iter()
                    .filter(|p| p.stage == *stage)
                    .cloned()
                    .collect();
                StageColumn {
                    stage: *stage,
                    label: stage.label(),
                    count: partnerships.len(),
                    partnerships,
                }
            })
            .collect()
    }

    pub async fn add_partnership_task(
        &self,
        partnership_id: Uuid,
        new: NewTask,
    ) -> Result<PartnershipTask> {
        let mut inner = self.inner.write().await;
        let partnership = inner.partnership_mut(partnership_id)?;

        let now = Utc::now();
        let task = PartnershipTask {
            id: Uuid::new_v4(),
            partnership_id,
            title: new.title,
            description: new.description,
            due_date: new.due_date,
            completed: false,
            created_at: now,
            updated_at: now,
        };
        partnership.tasks.push(task.clone());
        partnership.updated_at = now;
        Ok(task)
    }

    pub async fn set_task_completed(
        &self,
        partnership_id: Uuid,
        task_id: Uuid,
        completed: bool,
    ) -> Result<PartnershipTask> {
        let mut inner = self.inner.write().await;
        let partnership = inner.partnership_mut(partnership_id)?;
        let task = partnership
            .tasks
            .iter_mut()
            .find(|t| t.id == task_id)
            .ok_or_else(|| Error::NotFound(format!("task {}", task_id)))?;

        task.completed = completed;
        task.updated_at = Utc::now();
        Ok(task.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prospect(company: &str) -> NewPartnership {
        NewPartnership {
            company_name: company.to_string(),
            contact_name: "Ana Souza".to_string(),
            contact_email: "ana@example.com".to_string(),
            contact_phone: "(41) 9 8888-7777".to_string(),
            address: "Rua das Flores, 100".to_string(),
            city: "Curitiba".to_string(),
            state: "pr".to_string(),
            category: "Supermarket".to_string(),
            potential_screens: 4,
            notes: String::new(),
            assigned_to: "Carlos Lima".to_string(),
        }
    }

    #[tokio::test]
    async fn test_new_partnership_enters_analysis() {
        let store = Store::new();
        let p = store.create_partnership(prospect("Mercado Bom Preço")).await;
        assert_eq!(p.stage, PartnershipStage::Analysis);
        assert_eq!(p.stage_updated_at, p.created_at);
        assert_eq!(p.state, "PR");
    }

    #[tokio::test]
    async fn test_stage_change_touches_timestamps_and_reports_previous() {
        let store = Store::new();
        let p = store.create_partnership(prospect("Mercado Bom Preço")).await;

        let (previous, updated) = store
            .set_partnership_stage(p.id, PartnershipStage::Visit)
            .await
            .unwrap();

        assert_eq!(previous, PartnershipStage::Analysis);
        assert_eq!(updated.stage, PartnershipStage::Visit);
        assert!(updated.stage_updated_at > p.stage_updated_at);
        assert_eq!(updated.stage_updated_at, updated.updated_at);
    }

    #[tokio::test]
    async fn test_board_counts_sum_to_total() {
        let store = Store::new();
        for i in 0..7 {
            let p = store.create_partnership(prospect(&format!("Empresa {}", i))).await;
            let stage = PartnershipStage::ALL[i % PartnershipStage::ALL.len()];
            store.set_partnership_stage(p.id, stage).await.unwrap();
        }

        let board = store.partnership_board().await;
        assert_eq!(board.len(), 5);
        assert_eq!(board[0].stage, PartnershipStage::Analysis);
        assert_eq!(board[4].stage, PartnershipStage::Closed);

        let sum: usize = board.iter().map(|col| col.count).sum();
        assert_eq!(sum, store.list_partnerships().await.len());
        for col in &board {
            assert_eq!(col.count, col.partnerships.len());
            assert!(col.partnerships.iter().all(|p| p.stage == col.stage));
        }
    }

    #[tokio::test]
    async fn test_tasks_attach_and_complete() {
        let store = Store::new();
        let p = store.create_partnership(prospect("Mercado Bom Preço")).await;

        let task = store
            .add_partnership_task(
                p.id,
                NewTask {
                    title: "Agendar visita".to_string(),
                    description: "Confirmar com o gerente".to_string(),
                    due_date: Utc::now(),
                },
            )
            .await
            .unwrap();
        assert!(!task.completed);

        let done = store
            .set_task_completed(p.id, task.id, true)
            .await
            .unwrap();
        assert!(done.completed);

        let reloaded = store.get_partnership(p.id).await.unwrap();
        assert_eq!(reloaded.tasks.len(), 1);
        assert!(reloaded.tasks[0].completed);
    }
}
