use crate::error::Error;
use entity_api::error::Error as EntityApiError;
use events::{DomainEvent, EventPublisher};

/// Publish the event describing a committed write. Failed writes publish nothing.
pub(crate) async fn commit<T, F>(
    event_publisher: &EventPublisher,
    result: Result<T, EntityApiError>,
    to_event: F,
) -> Result<T, Error>
where
    F: FnOnce(&T) -> DomainEvent,
{
    let value = result?;
    event_publisher.publish(to_event(&value)).await;
    Ok(value)
}
