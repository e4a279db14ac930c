use async_trait::async_trait;
use deadpool_postgres::{Manager, ManagerConfig, Pool, RecyclingMethod};
use log::{debug, info};
use tokio_postgres::{types::Json, NoTls, Row};

use crate::{
    db::GardenRepository,
    error::{GardenError, GardenResult},
    models::{
        garden::{Garden, Grid, NewGarden},
        GardenId, OwnerId,
    },
};

mod embedded {
    refinery::embed_migrations!("migrations");
}

const GARDEN_COLUMNS: &str =
    "id, owner_id, name, width_cm, length_cm, grid, created_at, updated_at";

/// Builds a connection pool from a `postgres://` URL.
pub fn create_pool(database_url: &str, max_size: usize) -> GardenResult<Pool> {
    let pg_config: tokio_postgres::Config = database_url
        .parse()
        .map_err(|e| GardenError::Persistence(format!("invalid DATABASE_URL: {e}")))?;
    let manager = Manager::from_config(
        pg_config,
        NoTls,
        ManagerConfig {
            recycling_method: RecyclingMethod::Fast,
        },
    );
    Pool::builder(manager)
        .max_size(max_size)
        .build()
        .map_err(|e| GardenError::Persistence(format!("failed to build pool: {e}")))
}

/// Applies the embedded schema migrations.
pub async fn run_migrations(pool: &Pool) -> GardenResult<()> {
    let mut client = pool.get().await?;
    let report = embedded::migrations::runner()
        .run_async(&mut **client)
        .await
        .map_err(|e| GardenError::Persistence(format!("migration failed: {e}")))?;
    for migration in report.applied_migrations() {
        info!("applied migration {}", migration);
    }
    Ok(())
}

/// Gardens stored one row each, the grid as a JSONB array.
#[derive(Clone)]
pub struct PgGardenRepository {
    pool: Pool,
}

impl PgGardenRepository {
    pub fn new(pool: Pool) -> Self {
        Self { pool }
    }
}

fn dimension_param(value: u32) -> GardenResult<i32> {
    i32::try_from(value)
        .map_err(|_| GardenError::Validation(format!("dimension {value}cm is too large")))
}

fn dimension_column(row: &Row, column: &str) -> GardenResult<u32> {
    let raw: i32 = row.try_get(column)?;
    u32::try_from(raw)
        .map_err(|_| GardenError::Persistence(format!("stored {column} is negative: {raw}")))
}

fn garden_from_row(row: &Row) -> GardenResult<Garden> {
    let Json(grid): Json<Grid> = row.try_get("grid")?;
    Ok(Garden {
        id: row.try_get("id")?,
        owner_id: row.try_get("owner_id")?,
        name: row.try_get("name")?,
        width_cm: dimension_column(row, "width_cm")?,
        length_cm: dimension_column(row, "length_cm")?,
        grid,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

#[async_trait]
impl GardenRepository for PgGardenRepository {
    async fn insert_garden(&self, garden: NewGarden) -> GardenResult<Garden> {
        let client = self.pool.get().await?;
        let sql = format!(
            "INSERT INTO gardens (owner_id, name, width_cm, length_cm, grid) \
             VALUES ($1, $2, $3, $4, $5) RETURNING {GARDEN_COLUMNS}"
        );
        let row = client
            .query_one(
                &sql,
                &[
                    &garden.owner_id,
                    &garden.name,
                    &dimension_param(garden.width_cm)?,
                    &dimension_param(garden.length_cm)?,
                    &Json(&garden.grid),
                ],
            )
            .await?;
        garden_from_row(&row)
    }

    async fn load_garden(&self, id: GardenId) -> GardenResult<Option<Garden>> {
        let client = self.pool.get().await?;
        let sql = format!("SELECT {GARDEN_COLUMNS} FROM gardens WHERE id = $1");
        client
            .query_opt(&sql, &[&id])
            .await?
            .as_ref()
            .map(garden_from_row)
            .transpose()
    }

    async fn save_garden_grid(&self, id: GardenId, grid: &Grid) -> GardenResult<Option<Garden>> {
        let client = self.pool.get().await?;
        let sql = format!(
            "UPDATE gardens SET grid = $2, updated_at = now() WHERE id = $1 \
             RETURNING {GARDEN_COLUMNS}"
        );
        let row = client.query_opt(&sql, &[&id, &Json(grid)]).await?;
        debug!("saved grid of garden {id} ({} cells)", grid.len());
        row.as_ref().map(garden_from_row).transpose()
    }

    async fn load_gardens_for_owner(&self, owner_id: OwnerId) -> GardenResult<Vec<Garden>> {
        let client = self.pool.get().await?;
        let sql = format!("SELECT {GARDEN_COLUMNS} FROM gardens WHERE owner_id = $1 ORDER BY id");
        client
            .query(&sql, &[&owner_id])
            .await?
            .iter()
            .map(garden_from_row)
            .collect()
    }

    async fn delete_garden(
        &self,
        id: GardenId,
        owner_id: OwnerId,
    ) -> GardenResult<Option<Garden>> {
        let client = self.pool.get().await?;
        let sql = format!(
            "DELETE FROM gardens WHERE id = $1 AND owner_id = $2 RETURNING {GARDEN_COLUMNS}"
        );
        client
            .query_opt(&sql, &[&id, &owner_id])
            .await?
            .as_ref()
            .map(garden_from_row)
            .transpose()
    }
}
