use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use skybook_core::models::{OrderWithTickets, Ticket};
use skybook_core::repository::{OrderRepository, RepoError};

pub struct PostgresOrderRepository {
    pool: PgPool,
}

impl PostgresOrderRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct OrderRow {
    id: Uuid,
    user_id: Uuid,
    created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(sqlx::FromRow)]
struct TicketRow {
    id: Uuid,
    #[sqlx(rename = "seat_row")]
    row: i32,
    seat: i32,
    flight_id: Uuid,
    order_id: Uuid,
}

impl From<TicketRow> for Ticket {
    fn from(row: TicketRow) -> Self {
        Ticket {
            id: row.id,
            row: row.row,
            seat: row.seat,
            flight_id: row.flight_id,
            order_id: row.order_id,
        }
    }
}

impl PostgresOrderRepository {
    async fn tickets_for_orders(
        &self,
        order_ids: &[Uuid],
    ) -> Result<HashMap<Uuid, Vec<Ticket>>, RepoError> {
        let rows = sqlx::query_as::<_, TicketRow>(
            "SELECT id, seat_row, seat, flight_id, order_id \
             FROM tickets WHERE order_id = ANY($1) ORDER BY seat_row, seat",
        )
        .bind(order_ids)
        .fetch_all(&self.pool)
        .await?;

        let mut grouped: HashMap<Uuid, Vec<Ticket>> = HashMap::new();
        for row in rows {
            grouped.entry(row.order_id).or_default().push(row.into());
        }
        Ok(grouped)
    }
}

#[async_trait]
impl OrderRepository for PostgresOrderRepository {
    async fn list_orders(&self, user_id: Uuid) -> Result<Vec<OrderWithTickets>, RepoError> {
        let orders = sqlx::query_as::<_, OrderRow>(
            "SELECT id, user_id, created_at FROM orders \
             WHERE user_id = $1 ORDER BY created_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        let ids: Vec<Uuid> = orders.iter().map(|o| o.id).collect();
        let mut tickets = self.tickets_for_orders(&ids).await?;

        Ok(orders
            .into_iter()
            .map(|o| OrderWithTickets {
                id: o.id,
                user_id: o.user_id,
                created_at: o.created_at,
                tickets: tickets.remove(&o.id).unwrap_or_default(),
            })
            .collect())
    }

    async fn get_order(
        &self,
        id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<OrderWithTickets>, RepoError> {
        let order = sqlx::query_as::<_, OrderRow>(
            "SELECT id, user_id, created_at FROM orders WHERE id = $1 AND user_id = $2",
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        let Some(order) = order else {
            return Ok(None);
        };

        let mut tickets = self.tickets_for_orders(&[order.id]).await?;

        Ok(Some(OrderWithTickets {
            id: order.id,
            user_id: order.user_id,
            created_at: order.created_at,
            tickets: tickets.remove(&order.id).unwrap_or_default(),
        }))
    }
}
