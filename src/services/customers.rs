use crate::{
    db::DbPool,
    entities::customer,
    errors::ServiceError,
    events::{Event, EventSender},
};
use chrono::Utc;
use sea_orm::{ActiveModelTrait, EntityTrait, QueryOrder, Set};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, instrument};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Service for managing customers
#[derive(Clone)]
pub struct CustomerService {
    db_pool: Arc<DbPool>,
    event_sender: Arc<EventSender>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateCustomerRequest {
    #[validate(length(min = 1, message = "Customer name cannot be empty"))]
    pub name: String,
    #[validate(length(min = 1, message = "Phone number cannot be empty"))]
    pub phone: String,
    #[validate(email(message = "Invalid email address"))]
    pub email: Option<String>,
    pub address: Option<String>,
}

impl CustomerService {
    pub fn new(db_pool: Arc<DbPool>, event_sender: Arc<EventSender>) -> Self {
        Self {
            db_pool,
            event_sender,
        }
    }

    /// Creates a new customer
    #[instrument(skip(self))]
    pub async fn create_customer(
        &self,
        request: CreateCustomerRequest,
    ) -> Result<customer::Model, ServiceError> {
        request.validate()?;

        let model = customer::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(request.name),
            phone: Set(request.phone),
            email: Set(request.email),
            address: Set(request.address),
            created_at: Set(Utc::now()),
        };

        let saved = model.insert(&*self.db_pool).await?;

        info!(customer_id = %saved.id, "Customer created");
        self.event_sender
            .send(Event::CustomerCreated(saved.id))
            .await;

        Ok(saved)
    }

    /// Lists all customers, newest first
    #[instrument(skip(self))]
    pub async fn list_customers(&self) -> Result<Vec<customer::Model>, ServiceError> {
        let customers = customer::Entity::find()
            .order_by_desc(customer::Column::CreatedAt)
            .all(&*self.db_pool)
            .await?;

        Ok(customers)
    }

    /// Gets a customer by ID
    #[instrument(skip(self))]
    pub async fn get_customer(&self, customer_id: &Uuid) -> Result<customer::Model, ServiceError> {
        customer::Entity::find_by_id(*customer_id)
            .one(&*self.db_pool)
            .await?
            .ok_or_else(|| ServiceError::NotFound("Customer not found".to_string()))
    }

    /// Deletes a customer. Jobs keep their denormalized copy of the
    /// customer's contact details, so existing quotes are unaffected.
    #[instrument(skip(self))]
    pub async fn delete_customer(&self, customer_id: &Uuid) -> Result<(), ServiceError> {
        let result = customer::Entity::delete_by_id(*customer_id)
            .exec(&*self.db_pool)
            .await?;

        if result.rows_affected == 0 {
            return Err(ServiceError::NotFound("Customer not found".to_string()));
        }

        info!(customer_id = %customer_id, "Customer deleted");
        self.event_sender
            .send(Event::CustomerDeleted(*customer_id))
            .await;

        Ok(())
    }
}
