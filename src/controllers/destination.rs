use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::core::error::Error;
use crate::types::destination::Destination;
use crate::types::request::{NewDestination, UpdateDestination};

/// Destinations kept in insertion order.
#[derive(Clone, Debug)]
pub(crate) struct DestinationController {
    destinations: Arc<RwLock<Vec<Destination>>>,
}

impl DestinationController {
    pub(crate) fn new(destinations: impl IntoIterator<Item = Destination>) -> Self {
        let destinations = destinations.into_iter().collect();

        Self {
            destinations: Arc::new(RwLock::new(destinations)),
        }
    }

    pub(crate) fn seeded() -> Self {
        Self::new([
            Destination::new(
                "1",
                "Eiffel Tower",
                "A wrought-iron lattice tower in Paris, France.",
                "Paris, France",
            ),
            Destination::new(
                "2",
                "Grand Canyon",
                "A steep-sided canyon carved by the Colorado River.",
                "Arizona, USA",
            ),
            Destination::new(
                "3",
                "Great Wall of China",
                "A historic wall built to protect Chinese states and empires.",
                "China",
            ),
        ])
    }

    pub(crate) async fn list(&self) -> Vec<Destination> {
        self.destinations.read().await.clone()
    }

    pub(crate) async fn get(&self, id: &str) -> Result<Destination, Error> {
        self.destinations
            .read()
            .await
            .iter()
            .find(|destination| destination.id == id)
            .cloned()
            .ok_or(Error::DestinationNotFound)
    }

    pub(crate) async fn create(&self, params: NewDestination) -> Destination {
        let destination = Destination {
            id: Uuid::new_v4().to_string(),
            name: params.name,
            description: params.description,
            location: params.location,
        };

        self.destinations
            .write()
            .await
            .push(destination.clone());

        destination
    }

    pub(crate) async fn update(
        &self,
        id: &str,
        params: UpdateDestination,
    ) -> Result<Destination, Error> {
        let mut destinations = self.destinations.write().await;
        let destination = destinations
            .iter_mut()
            .find(|destination| destination.id == id)
            .ok_or(Error::DestinationNotFound)?;

        if let Some(name) = params.name {
            destination.name = name;
        }

        if let Some(description) = params.description {
            destination.description = description;
        }

        if let Some(location) = params.location {
            destination.location = location;
        }

        Ok(destination.clone())
    }

    pub(crate) async fn delete(&self, id: &str) -> Result<(), Error> {
        let mut destinations = self.destinations.write().await;
        let index = destinations
            .iter()
            .position(|destination| destination.id == id)
            .ok_or(Error::DestinationNotFound)?;

        destinations.remove(index);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_seeded() {
        let destinations = DestinationController::seeded();

        let all = destinations.list().await;
        assert_eq!(all.len(), 3);
        assert_eq!(all[0].name, "Eiffel Tower");
        assert_eq!(destinations.get("3").await.unwrap().location, "China");
    }

    #[tokio::test]
    async fn test_create_update_delete() {
        let destinations = DestinationController::new(Vec::<Destination>::new());

        let created = destinations
            .create(NewDestination {
                name: "Machu Picchu".into(),
                description: String::new(),
                location: "Peru".into(),
            })
            .await;

        let updated = destinations
            .update(
                &created.id,
                UpdateDestination {
                    description: Some("Inca citadel".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.name, "Machu Picchu");
        assert_eq!(updated.description, "Inca citadel");

        destinations.delete(&created.id).await.unwrap();
        assert!(matches!(
            destinations.get(&created.id).await,
            Err(Error::DestinationNotFound)
        ));
        assert!(matches!(
            destinations.delete(&created.id).await,
            Err(Error::DestinationNotFound)
        ));
    }

    #[tokio::test]
    async fn test_list_keeps_insertion_order() {
        let destinations = DestinationController::seeded();

        let created = destinations
            .create(NewDestination {
                name: "Machu Picchu".into(),
                description: String::new(),
                location: "Peru".into(),
            })
            .await;

        let ids: Vec<String> = destinations
            .list()
            .await
            .into_iter()
            .map(|destination| destination.id)
            .collect();
        assert_eq!(ids, vec!["1".to_string(), "2".into(), "3".into(), created.id]);

        destinations.delete("2").await.unwrap();
        let names: Vec<String> = destinations
            .list()
            .await
            .into_iter()
            .map(|destination| destination.name)
            .collect();
        assert_eq!(
            names,
            vec!["Eiffel Tower", "Great Wall of China", "Machu Picchu"]
        );
    }
}
