use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use skybook_core::models::{Airplane, AirplaneType, Airport, Crew, Route};
use skybook_core::repository::{CatalogRepository, NewAirplane, RepoError};

pub struct PostgresCatalogRepository {
    pool: PgPool,
}

impl PostgresCatalogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// Internal structs for type-safe querying
#[derive(sqlx::FromRow)]
struct AirportRow {
    id: Uuid,
    name: String,
    closest_big_city: String,
}

#[derive(sqlx::FromRow)]
struct RouteRow {
    id: Uuid,
    source_id: Uuid,
    destination_id: Uuid,
    distance_km: i32,
}

#[derive(sqlx::FromRow)]
struct AirplaneTypeRow {
    id: Uuid,
    name: String,
}

#[derive(sqlx::FromRow)]
struct AirplaneRow {
    id: Uuid,
    name: String,
    #[sqlx(rename = "seat_rows")]
    rows: i32,
    seats_in_row: i32,
    airplane_type_id: Uuid,
}

#[derive(sqlx::FromRow)]
struct CrewRow {
    id: Uuid,
    first_name: String,
    last_name: String,
}

impl From<AirportRow> for Airport {
    fn from(r: AirportRow) -> Self {
        Airport {
            id: r.id,
            name: r.name,
            closest_big_city: r.closest_big_city,
        }
    }
}

impl From<RouteRow> for Route {
    fn from(r: RouteRow) -> Self {
        Route {
            id: r.id,
            source_id: r.source_id,
            destination_id: r.destination_id,
            distance_km: r.distance_km,
        }
    }
}

impl From<AirplaneTypeRow> for AirplaneType {
    fn from(r: AirplaneTypeRow) -> Self {
        AirplaneType {
            id: r.id,
            name: r.name,
        }
    }
}

impl From<AirplaneRow> for Airplane {
    fn from(r: AirplaneRow) -> Self {
        Airplane {
            id: r.id,
            name: r.name,
            rows: r.rows,
            seats_in_row: r.seats_in_row,
            airplane_type_id: r.airplane_type_id,
        }
    }
}

impl From<CrewRow> for Crew {
    fn from(r: CrewRow) -> Self {
        Crew {
            id: r.id,
            first_name: r.first_name,
            last_name: r.last_name,
        }
    }
}

#[async_trait]
impl CatalogRepository for PostgresCatalogRepository {
    async fn create_airport(
        &self,
        name: &str,
        closest_big_city: &str,
    ) -> Result<Airport, RepoError> {
        let id = Uuid::new_v4();
        sqlx::query("INSERT INTO airports (id, name, closest_big_city) VALUES ($1, $2, $3)")
            .bind(id)
            .bind(name)
            .bind(closest_big_city)
            .execute(&self.pool)
            .await?;

        Ok(Airport {
            id,
            name: name.to_string(),
            closest_big_city: closest_big_city.to_string(),
        })
    }

    async fn list_airports(&self, search: Option<&str>) -> Result<Vec<Airport>, RepoError> {
        let rows = sqlx::query_as::<_, AirportRow>(
            "SELECT id, name, closest_big_city FROM airports \
             WHERE ($1::text IS NULL \
                    OR name ILIKE '%' || $1 || '%' \
                    OR closest_big_city ILIKE '%' || $1 || '%') \
             ORDER BY id",
        )
        .bind(search)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Airport::from).collect())
    }

    async fn get_airport(&self, id: Uuid) -> Result<Option<Airport>, RepoError> {
        let row = sqlx::query_as::<_, AirportRow>(
            "SELECT id, name, closest_big_city FROM airports WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Airport::from))
    }

    async fn create_route(
        &self,
        source_id: Uuid,
        destination_id: Uuid,
        distance_km: i32,
    ) -> Result<Route, RepoError> {
        let id = Uuid::new_v4();
        sqlx::query(
            "INSERT INTO routes (id, source_id, destination_id, distance_km) \
             VALUES ($1, $2, $3, $4)",
        )
        .bind(id)
        .bind(source_id)
        .bind(destination_id)
        .bind(distance_km)
        .execute(&self.pool)
        .await?;

        Ok(Route {
            id,
            source_id,
            destination_id,
            distance_km,
        })
    }

    async fn list_routes(
        &self,
        source: Option<Uuid>,
        destination: Option<Uuid>,
    ) -> Result<Vec<Route>, RepoError> {
        let rows = sqlx::query_as::<_, RouteRow>(
            "SELECT id, source_id, destination_id, distance_km FROM routes \
             WHERE ($1::uuid IS NULL OR source_id = $1) \
             AND ($2::uuid IS NULL OR destination_id = $2) \
             ORDER BY id",
        )
        .bind(source)
        .bind(destination)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Route::from).collect())
    }

    async fn get_route(&self, id: Uuid) -> Result<Option<Route>, RepoError> {
        let row = sqlx::query_as::<_, RouteRow>(
            "SELECT id, source_id, destination_id, distance_km FROM routes WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Route::from))
    }

    async fn create_airplane_type(&self, name: &str) -> Result<AirplaneType, RepoError> {
        let id = Uuid::new_v4();
        sqlx::query("INSERT INTO airplane_types (id, name) VALUES ($1, $2)")
            .bind(id)
            .bind(name)
            .execute(&self.pool)
            .await?;

        Ok(AirplaneType {
            id,
            name: name.to_string(),
        })
    }

    async fn list_airplane_types(&self) -> Result<Vec<AirplaneType>, RepoError> {
        let rows = sqlx::query_as::<_, AirplaneTypeRow>(
            "SELECT id, name FROM airplane_types ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(AirplaneType::from).collect())
    }

    async fn get_airplane_type(&self, id: Uuid) -> Result<Option<AirplaneType>, RepoError> {
        let row =
            sqlx::query_as::<_, AirplaneTypeRow>("SELECT id, name FROM airplane_types WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(row.map(AirplaneType::from))
    }

    async fn create_airplane(&self, new: &NewAirplane) -> Result<Airplane, RepoError> {
        let id = Uuid::new_v4();
        sqlx::query(
            "INSERT INTO airplanes (id, name, seat_rows, seats_in_row, airplane_type_id) \
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(id)
        .bind(&new.name)
        .bind(new.rows)
        .bind(new.seats_in_row)
        .bind(new.airplane_type_id)
        .execute(&self.pool)
        .await?;

        Ok(Airplane {
            id,
            name: new.name.clone(),
            rows: new.rows,
            seats_in_row: new.seats_in_row,
            airplane_type_id: new.airplane_type_id,
        })
    }

    async fn list_airplanes(
        &self,
        airplane_type: Option<Uuid>,
        search: Option<&str>,
    ) -> Result<Vec<Airplane>, RepoError> {
        let rows = sqlx::query_as::<_, AirplaneRow>(
            "SELECT id, name, seat_rows, seats_in_row, airplane_type_id FROM airplanes \
             WHERE ($1::uuid IS NULL OR airplane_type_id = $1) \
             AND ($2::text IS NULL OR name ILIKE '%' || $2 || '%') \
             ORDER BY id",
        )
        .bind(airplane_type)
        .bind(search)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Airplane::from).collect())
    }

    async fn get_airplane(&self, id: Uuid) -> Result<Option<Airplane>, RepoError> {
        let row = sqlx::query_as::<_, AirplaneRow>(
            "SELECT id, name, seat_rows, seats_in_row, airplane_type_id \
             FROM airplanes WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Airplane::from))
    }

    async fn create_crew(&self, first_name: &str, last_name: &str) -> Result<Crew, RepoError> {
        let id = Uuid::new_v4();
        sqlx::query("INSERT INTO crews (id, first_name, last_name) VALUES ($1, $2, $3)")
            .bind(id)
            .bind(first_name)
            .bind(last_name)
            .execute(&self.pool)
            .await?;

        Ok(Crew {
            id,
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
        })
    }

    async fn list_crews(&self, search: Option<&str>) -> Result<Vec<Crew>, RepoError> {
        let rows = sqlx::query_as::<_, CrewRow>(
            "SELECT id, first_name, last_name FROM crews \
             WHERE ($1::text IS NULL \
                    OR first_name ILIKE '%' || $1 || '%' \
                    OR last_name ILIKE '%' || $1 || '%') \
             ORDER BY id",
        )
        .bind(search)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Crew::from).collect())
    }

    async fn get_crew(&self, id: Uuid) -> Result<Option<Crew>, RepoError> {
        let row = sqlx::query_as::<_, CrewRow>(
            "SELECT id, first_name, last_name FROM crews WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Crew::from))
    }
}
