//! SQL Server sink.
//!
//! Tables are replaced inside one transaction: drop, recreate with every
//! column as nullable `NVARCHAR(MAX)`, then batched parameterised inserts.
//! The client runs on a current-thread runtime so callers stay synchronous.

use polars::prelude::{Column, DataFrame, DataType, PolarsResult, StringChunked};
use tiberius::{AuthMethod, Client, Config, Query};
use tokio::net::TcpStream;
use tokio_util::compat::{Compat, TokioAsyncWriteCompatExt};
use tracing::{debug, info, warn};

use crate::config::{ConnectionOptions, DatabaseSettings};
use crate::error::{OutputError, Result};
use crate::sink::TableSink;

/// SQL Server caps a request at 2100 parameters.
const MAX_PARAMS_PER_STATEMENT: usize = 2000;

/// SQL Server caps a `VALUES` list at 1000 rows.
const MAX_ROWS_PER_STATEMENT: usize = 1000;

type SqlClient = Client<Compat<TcpStream>>;

/// Replace-loads tables into a SQL Server database.
#[derive(Debug, Clone)]
pub struct SqlServerSink {
    settings: DatabaseSettings,
    options: ConnectionOptions,
}

impl SqlServerSink {
    pub fn new(settings: DatabaseSettings, options: ConnectionOptions) -> Self {
        Self { settings, options }
    }

    fn client_config(&self) -> Config {
        let mut config = Config::new();
        config.host(&self.settings.server.host);
        config.port(self.settings.server.port);
        config.database(&self.settings.database);
        config.application_name(&self.options.driver);
        config.authentication(AuthMethod::sql_server(
            &self.settings.user,
            &self.settings.password,
        ));
        if self.options.trusted_connection {
            config.trust_cert();
        }
        config
    }

    async fn connect(&self) -> Result<SqlClient> {
        let config = self.client_config();
        let connect_error = |message: String| OutputError::Connect {
            server: self.settings.server.to_string(),
            message,
        };

        let tcp = TcpStream::connect(config.get_addr())
            .await
            .map_err(|e| connect_error(e.to_string()))?;
        tcp.set_nodelay(true)
            .map_err(|e| connect_error(e.to_string()))?;
        let client = Client::connect(config, tcp.compat_write())
            .await
            .map_err(|e| connect_error(e.to_string()))?;

        info!(
            server = %self.settings.server,
            database = %self.settings.database,
            driver = %self.options.driver,
            trusted_connection = self.options.trusted_connection,
            "connected to database"
        );
        Ok(client)
    }
}

impl TableSink for SqlServerSink {
    fn replace_table(&mut self, name: &str, table: &DataFrame) -> Result<usize> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(OutputError::Runtime)?;

        runtime.block_on(async {
            let mut client = self.connect().await?;
            replace_in_transaction(&mut client, name, table).await
        })
    }
}

fn query_error(table: &str) -> impl Fn(tiberius::error::Error) -> OutputError + '_ {
    move |err| OutputError::Query {
        table: table.to_string(),
        message: err.to_string(),
    }
}

/// Runs a statement as a plain batch. Transaction control must not go
/// through `execute`, which wraps it in `sp_executesql`.
async fn run_batch(client: &mut SqlClient, statement: &str) -> tiberius::Result<()> {
    client.simple_query(statement).await?.into_results().await?;
    Ok(())
}

async fn replace_in_transaction(
    client: &mut SqlClient,
    name: &str,
    table: &DataFrame,
) -> Result<usize> {
    run_batch(client, "BEGIN TRANSACTION")
        .await
        .map_err(query_error(name))?;

    match write_table(client, name, table).await {
        Ok(rows) => {
            run_batch(client, "COMMIT TRANSACTION")
                .await
                .map_err(query_error(name))?;
            Ok(rows)
        }
        Err(err) => {
            if let Err(rollback) = run_batch(client, "ROLLBACK TRANSACTION").await {
                warn!(table = name, error = %rollback, "rollback failed");
            }
            Err(err)
        }
    }
}

async fn write_table(client: &mut SqlClient, name: &str, table: &DataFrame) -> Result<usize> {
    let names: Vec<&str> = table
        .get_column_names()
        .into_iter()
        .map(|column| column.as_str())
        .collect();
    if names.is_empty() {
        return Err(OutputError::Query {
            table: name.to_string(),
            message: "table has no columns".to_string(),
        });
    }

    let text_columns: Vec<Column> = table
        .get_columns()
        .iter()
        .map(|column| column.cast(&DataType::String))
        .collect::<PolarsResult<_>>()?;
    let values: Vec<&StringChunked> = text_columns
        .iter()
        .map(Column::str)
        .collect::<PolarsResult<_>>()?;

    client
        .execute(drop_table_sql(name), &[])
        .await
        .map_err(query_error(name))?;
    client
        .execute(create_table_sql(name, &names), &[])
        .await
        .map_err(query_error(name))?;

    let height = table.height();
    let batch = rows_per_batch(names.len());
    let mut written = 0;
    for start in (0..height).step_by(batch) {
        let end = (start + batch).min(height);
        let mut query = Query::new(insert_sql(name, &names, end - start));
        for row in start..end {
            for column in &values {
                query.bind(column.get(row));
            }
        }
        query.execute(client).await.map_err(query_error(name))?;
        written += end - start;
        debug!(table = name, written, total = height, "rows inserted");
    }

    info!(table = name, rows = written, "table replaced");
    Ok(written)
}

fn quote_ident(name: &str) -> String {
    format!("[{}]", name.replace(']', "]]"))
}

fn drop_table_sql(name: &str) -> String {
    format!(
        "IF OBJECT_ID(N'{}', N'U') IS NOT NULL DROP TABLE {}",
        name.replace('\'', "''"),
        quote_ident(name)
    )
}

fn create_table_sql(name: &str, columns: &[&str]) -> String {
    let definitions: Vec<String> = columns
        .iter()
        .map(|column| format!("{} NVARCHAR(MAX) NULL", quote_ident(column)))
        .collect();
    format!(
        "CREATE TABLE {} ({})",
        quote_ident(name),
        definitions.join(", ")
    )
}

fn insert_sql(name: &str, columns: &[&str], rows: usize) -> String {
    let column_list: Vec<String> = columns.iter().map(|column| quote_ident(column)).collect();
    let tuples: Vec<String> = (0..rows)
        .map(|row| {
            let placeholders: Vec<String> = (0..columns.len())
                .map(|col| format!("@P{}", row * columns.len() + col + 1))
                .collect();
            format!("({})", placeholders.join(", "))
        })
        .collect();
    format!(
        "INSERT INTO {} ({}) VALUES {}",
        quote_ident(name),
        column_list.join(", "),
        tuples.join(", ")
    )
}

fn rows_per_batch(columns: usize) -> usize {
    (MAX_PARAMS_PER_STATEMENT / columns.max(1)).clamp(1, MAX_ROWS_PER_STATEMENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identifiers_are_bracket_quoted() {
        assert_eq!(quote_ident("Cod_SBS"), "[Cod_SBS]");
        assert_eq!(quote_ident("odd]name"), "[odd]]name]");
    }

    #[test]
    fn create_uses_nullable_nvarchar() {
        let sql = create_table_sql("tabla_deudas", &["Cod_SBS", "Moneda"]);
        assert_eq!(
            sql,
            "CREATE TABLE [tabla_deudas] ([Cod_SBS] NVARCHAR(MAX) NULL, [Moneda] NVARCHAR(MAX) NULL)"
        );
    }

    #[test]
    fn drop_is_conditional() {
        assert_eq!(
            drop_table_sql("tabla_deudas"),
            "IF OBJECT_ID(N'tabla_deudas', N'U') IS NOT NULL DROP TABLE [tabla_deudas]"
        );
    }

    #[test]
    fn insert_numbers_parameters_across_rows() {
        let sql = insert_sql("t", &["a", "b"], 2);
        assert_eq!(
            sql,
            "INSERT INTO [t] ([a], [b]) VALUES (@P1, @P2), (@P3, @P4)"
        );
    }

    #[test]
    fn batches_stay_under_parameter_limit() {
        assert_eq!(rows_per_batch(10), 200);
        assert_eq!(rows_per_batch(1), 1000);
        assert_eq!(rows_per_batch(5000), 1);
        assert!(rows_per_batch(11) * 11 <= MAX_PARAMS_PER_STATEMENT);
    }

    #[test]
    fn trusted_connection_is_default() {
        let options = ConnectionOptions::default();
        assert!(options.trusted_connection);
        assert_eq!(options.driver, "ODBC Driver 17 for SQL Server");
    }
}
