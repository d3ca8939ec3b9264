// gateway/src/store/postgres.rs

//! `DocumentStore` over PostgreSQL. Each collection is a table of JSONB
//! documents; `seq` preserves insertion order for unsorted reads and ties.

use async_trait::async_trait;
use serde_json::Value;
use sqlx::postgres::{PgPool, PgPoolOptions};
use sqlx::types::Json;
use sqlx::{Postgres, QueryBuilder};
use tracing::{debug, instrument};
use trade_core::document::with_id;
use trade_core::{
  Collection, DeleteResult, Document, DocumentStore, Filter, FindOptions, InsertResult, ObjectId, SortDirection,
  SortKey, TradeError, TradeResult, Update, UpdateResult, ID_FIELD,
};

#[derive(Debug, Clone)]
pub struct PgDocumentStore {
  pool: PgPool,
}

fn backend(err: sqlx::Error) -> TradeError {
  TradeError::Backend { source: err.into() }
}

fn to_i64(value: u64) -> i64 {
  i64::try_from(value).unwrap_or(i64::MAX)
}

impl PgDocumentStore {
  pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, sqlx::Error> {
    let pool = PgPoolOptions::new()
      .max_connections(max_connections)
      .connect(database_url)
      .await?;
    let store = Self::from_pool(pool);
    store.ensure_schema().await?;
    Ok(store)
  }

  pub fn from_pool(pool: PgPool) -> Self {
    PgDocumentStore { pool }
  }

  pub async fn ensure_schema(&self) -> Result<(), sqlx::Error> {
    for collection in Collection::ALL {
      let ddl = format!(
        "CREATE TABLE IF NOT EXISTS {} (id TEXT PRIMARY KEY, seq BIGSERIAL NOT NULL, doc JSONB NOT NULL)",
        collection.name()
      );
      sqlx::query(&ddl).execute(&self.pool).await?;
    }
    debug!("document tables ensured");
    Ok(())
  }
}

/// Appends `filter` as a boolean SQL expression over the `doc` column.
pub(crate) fn push_filter(qb: &mut QueryBuilder<'_, Postgres>, filter: &Filter) {
  match filter {
    Filter::All => {
      qb.push("TRUE");
    }
    Filter::Eq { field, value } if value.is_null() => {
      qb.push("(doc -> ");
      qb.push_bind(field.clone());
      qb.push("::text IS NULL OR doc -> ");
      qb.push_bind(field.clone());
      qb.push("::text = 'null'::jsonb)");
    }
    Filter::Eq { field, value } => {
      qb.push("doc -> ");
      qb.push_bind(field.clone());
      qb.push("::text = ");
      qb.push_bind(Json(value.clone()));
    }
    Filter::Gte { field, value } => {
      qb.push("CASE WHEN jsonb_typeof(doc -> ");
      qb.push_bind(field.clone());
      qb.push("::text) = 'number' THEN (doc ->> ");
      qb.push_bind(field.clone());
      qb.push("::text)::float8 >= ");
      qb.push_bind(*value);
      qb.push(" ELSE FALSE END");
    }
    Filter::Regex {
      field,
      regex,
      case_insensitive,
    } => {
      qb.push("COALESCE(jsonb_typeof(doc -> ");
      qb.push_bind(field.clone());
      qb.push("::text) = 'string' AND (doc ->> ");
      qb.push_bind(field.clone());
      qb.push(if *case_insensitive { "::text) ~* " } else { "::text) ~ " });
      qb.push_bind(regex.as_str().to_string());
      qb.push(", FALSE)");
    }
    Filter::And(filters) | Filter::Or(filters) if filters.is_empty() => {
      qb.push(if matches!(filter, Filter::And(_)) { "TRUE" } else { "FALSE" });
    }
    Filter::And(filters) | Filter::Or(filters) => {
      let joiner = if matches!(filter, Filter::And(_)) { " AND " } else { " OR " };
      qb.push("(");
      for (i, inner) in filters.iter().enumerate() {
        if i > 0 {
          qb.push(joiner);
        }
        push_filter(qb, inner);
      }
      qb.push(")");
    }
  }
}

pub(crate) fn push_order(qb: &mut QueryBuilder<'_, Postgres>, sort: Option<&SortKey>) {
  qb.push(" ORDER BY ");
  if let Some(key) = sort {
    qb.push("doc -> ");
    qb.push_bind(key.field.clone());
    qb.push(match key.direction {
      SortDirection::Ascending => "::text ASC NULLS FIRST, ",
      SortDirection::Descending => "::text DESC NULLS LAST, ",
    });
  }
  qb.push("seq ASC");
}

/// Builds the new-document expression for an update against alias `t`.
pub(crate) fn push_update_expr(qb: &mut QueryBuilder<'_, Postgres>, update: &Update) {
  let mut set = update.set.clone();
  set.remove(ID_FIELD);

  for _ in &update.inc {
    qb.push("jsonb_set(");
  }
  if set.is_empty() {
    qb.push("t.doc");
  } else {
    qb.push("(t.doc || ");
    qb.push_bind(Json(Value::Object(set)));
    qb.push("::jsonb)");
  }
  for (field, by) in &update.inc {
    qb.push(", ARRAY[");
    qb.push_bind(field.clone());
    qb.push("::text], to_jsonb(COALESCE((t.doc ->> ");
    qb.push_bind(field.clone());
    qb.push("::text)::numeric, 0) + ");
    qb.push_bind(*by);
    qb.push("))");
  }
}

#[async_trait]
impl DocumentStore for PgDocumentStore {
  fn backend_name(&self) -> &'static str {
    "postgres"
  }

  #[instrument(name = "pg_store::find", skip(self, options), fields(collection = %collection))]
  async fn find(&self, collection: Collection, options: &FindOptions) -> TradeResult<Vec<Document>> {
    let mut qb = QueryBuilder::<Postgres>::new(format!("SELECT doc FROM {} WHERE ", collection.name()));
    push_filter(&mut qb, &options.filter);
    push_order(&mut qb, options.sort.as_ref());
    if let Some(limit) = options.limit {
      qb.push(" LIMIT ");
      qb.push_bind(to_i64(limit));
    }
    if options.skip > 0 {
      qb.push(" OFFSET ");
      qb.push_bind(to_i64(options.skip));
    }

    let rows: Vec<Json<Document>> = qb
      .build_query_scalar()
      .fetch_all(&self.pool)
      .await
      .map_err(backend)?;
    Ok(rows.into_iter().map(|Json(doc)| doc).collect())
  }

  async fn count(&self, collection: Collection, filter: &Filter) -> TradeResult<u64> {
    let mut qb = QueryBuilder::<Postgres>::new(format!("SELECT COUNT(*) FROM {} WHERE ", collection.name()));
    push_filter(&mut qb, filter);
    let count: i64 = qb
      .build_query_scalar()
      .fetch_one(&self.pool)
      .await
      .map_err(backend)?;
    Ok(u64::try_from(count).unwrap_or(0))
  }

  #[instrument(name = "pg_store::insert_one", skip(self, doc), fields(collection = %collection))]
  async fn insert_one(&self, collection: Collection, doc: Document) -> TradeResult<InsertResult> {
    let id = ObjectId::new();
    let doc = with_id(doc, id);
    let sql = format!("INSERT INTO {} (id, doc) VALUES ($1, $2)", collection.name());
    sqlx::query(&sql)
      .bind(id.to_hex())
      .bind(Json(doc))
      .execute(&self.pool)
      .await
      .map_err(backend)?;
    Ok(InsertResult {
      acknowledged: true,
      inserted_id: id,
    })
  }

  // The locked target row is re-checked against the filter, so a guarded
  // decrement cannot overshoot under concurrent updates.
  #[instrument(name = "pg_store::update_one", skip(self, filter, update), fields(collection = %collection))]
  async fn update_one(&self, collection: Collection, filter: &Filter, update: &Update) -> TradeResult<UpdateResult> {
    let table = collection.name();
    let mut qb = QueryBuilder::<Postgres>::new(format!("WITH target AS (SELECT id, doc FROM {} WHERE ", table));
    push_filter(&mut qb, filter);
    qb.push(format!(
      " ORDER BY seq ASC LIMIT 1 FOR UPDATE), updated AS (UPDATE {} AS t SET doc = ",
      table
    ));
    push_update_expr(&mut qb, update);
    qb.push(" FROM target WHERE t.id = target.id RETURNING t.doc AS new_doc, target.doc AS old_doc) ");
    qb.push("SELECT new_doc IS DISTINCT FROM old_doc FROM updated");

    let changed: Option<bool> = qb
      .build_query_scalar()
      .fetch_optional(&self.pool)
      .await
      .map_err(backend)?;
    Ok(UpdateResult {
      acknowledged: true,
      matched_count: u64::from(changed.is_some()),
      modified_count: u64::from(changed.unwrap_or(false)),
    })
  }

  #[instrument(name = "pg_store::delete_one", skip(self, filter), fields(collection = %collection))]
  async fn delete_one(&self, collection: Collection, filter: &Filter) -> TradeResult<DeleteResult> {
    let table = collection.name();
    let mut qb = QueryBuilder::<Postgres>::new(format!(
      "DELETE FROM {table} WHERE id = (SELECT id FROM {table} WHERE "
    ));
    push_filter(&mut qb, filter);
    qb.push(" ORDER BY seq ASC LIMIT 1)");
    let result = qb.build().execute(&self.pool).await.map_err(backend)?;
    Ok(DeleteResult {
      acknowledged: true,
      deleted_count: result.rows_affected(),
    })
  }

  async fn ping(&self) -> TradeResult<()> {
    sqlx::query("SELECT 1").execute(&self.pool).await.map_err(backend)?;
    Ok(())
  }

  async fn close(&self) {
    self.pool.close().await;
    tracing::info!("Database pool closed.");
  }
}
