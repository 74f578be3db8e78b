//! Generic statement execution over the single database connection.
//!
//! Every query result is materialized as text. The statement becomes a CTE
//! and each of its rows is fetched twice over: `row_to_json` supplies the
//! column names in select-list order, and the row's record text supplies the
//! values exactly as Postgres prints them, with SQL NULL mapped to `None`.

use std::{error::Error, fmt::{self, Debug}, io::Write};

use diesel::{
    pg::Pg,
    query_builder::{BoxedSqlQuery, SqlQuery},
    sql_types::{BigInt, Integer, Numeric, Text},
    Connection, ConnectionError, PgConnection, QueryableByName, RunQueryDsl
};
use rust_decimal::Decimal;
use serde::{de::{IgnoredAny, MapAccess, Visitor}, Deserialize, Deserializer};
use thiserror::Error;

use crate::{configuration::DatabaseSettings, utils::error_fmt_chain};

/// One materialized row: column values as text, `None` for NULL.
pub type Row = Vec<Option<String>>;

/// A value bound to a `$n` placeholder.
#[derive(Debug, Clone, PartialEq)]
pub enum Param{
    Text(String),
    Integer(i32),
    Decimal(Decimal)
}

impl From<&str> for Param {
    fn from(value: &str) -> Self {
        Param::Text(value.to_string())
    }
}

impl From<String> for Param {
    fn from(value: String) -> Self {
        Param::Text(value)
    }
}

impl From<i32> for Param {
    fn from(value: i32) -> Self {
        Param::Integer(value)
    }
}

impl From<Decimal> for Param {
    fn from(value: Decimal) -> Self {
        Param::Decimal(value)
    }
}

/// SQL text with `$1..$n` placeholders and the values bound to them, in order.
#[derive(Debug, Clone)]
pub struct Statement{
    sql: String,
    params: Vec<Param>
}

impl Statement{
    pub fn new(sql: impl Into<String>) -> Self {
        Statement{
            sql: sql.into(),
            params: Vec::new()
        }
    }

    pub fn bind(mut self, param: impl Into<Param>) -> Self {
        self.params.push(param.into());
        self
    }

    pub fn sql(&self) -> &str {
        &self.sql
    }

    pub fn params(&self) -> &[Param] {
        &self.params
    }

    // Same parameters, statement body embedded as a CTE of `template`
    fn wrapped(&self, template: impl FnOnce(&str) -> String) -> Statement {
        let body = self.sql.trim().trim_end_matches(';').trim_end();
        Statement{
            sql: template(body),
            params: self.params.clone()
        }
    }

    fn to_query(&self) -> BoxedSqlQuery<'static, Pg, SqlQuery> {
        self.params.iter().fold(
            diesel::sql_query(self.sql.clone()).into_boxed(),
            |query, param| match param {
                Param::Text(value) => query.bind::<Text, _>(value.clone()),
                Param::Integer(value) => query.bind::<Integer, _>(*value),
                Param::Decimal(value) => query.bind::<Numeric, _>(*value)
            }
        )
    }
}

#[derive(Error)]
pub enum DatabaseError{
    #[error("Unable to connect to database")]
    Connection(#[from] ConnectionError),
    #[error("Failed to run statement")]
    Query(#[from] diesel::result::Error),
    #[error("Failed to decode result row")]
    Decode(#[from] serde_json::Error),
    #[error("Failed to decode result row: {0}")]
    MalformedRow(String),
    #[error("Failed to write result")]
    Output(#[from] std::io::Error)
}

impl Debug for DatabaseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self)?;
        error_fmt_chain(f, &self.source())
    }
}

#[derive(QueryableByName)]
struct ResultRow{
    // Column names, in select-list order
    #[diesel(sql_type = Text, column_name = row)]
    row_json: String,
    // The whole row in Postgres' record text form
    #[diesel(sql_type = Text)]
    record: String
}

#[derive(QueryableByName)]
struct CountRow{
    #[diesel(sql_type = BigInt)]
    count: i64
}

// Keeps column order and duplicate column names, unlike a json map
#[derive(Debug, PartialEq)]
struct OrderedRow(Vec<(String, Option<String>)>);

impl OrderedRow{
    fn parse(row: &ResultRow) -> Result<OrderedRow, DatabaseError> {
        let ColumnNames(names) = serde_json::from_str(&row.row_json)?;
        let values = record_fields(&row.record, names.len())
                        .map_err(DatabaseError::MalformedRow)?;

        if values.len() != names.len() {
            return Err(DatabaseError::MalformedRow(format!(
                "{} values for {} columns in {}",
                values.len(),
                names.len(),
                row.record
            )))
        }

        Ok(OrderedRow(names.into_iter().zip(values).collect()))
    }

    fn column_names(&self) -> Vec<&str> {
        self.0.iter().map(|(name, _)| name.as_str()).collect()
    }

    fn into_values(self) -> Row {
        self.0.into_iter().map(|(_, value)| value).collect()
    }
}

// Keys of a `row_to_json` object, duplicates included
struct ColumnNames(Vec<String>);

impl<'de> Deserialize<'de> for ColumnNames {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>
    {
        struct NamesVisitor;

        impl<'de> Visitor<'de> for NamesVisitor {
            type Value = ColumnNames;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a json object holding one result row")
            }

            fn visit_map<A>(self, mut map: A) -> Result<ColumnNames, A::Error>
            where
                A: MapAccess<'de>
            {
                let mut names = Vec::with_capacity(map.size_hint().unwrap_or(0));

                while let Some((name, _)) = map.next_entry::<String, IgnoredAny>()? {
                    names.push(name);
                }

                Ok(ColumnNames(names))
            }
        }

        deserializer.deserialize_map(NamesVisitor)
    }
}

/// Splits a record literal such as `(1,"a b",,t)` into its fields.
///
/// An empty unquoted field is NULL; a quoted field may hold anything, with `""`
/// and backslash escapes. `columns` disambiguates `()`, which is both the empty
/// record and a record of one NULL.
fn record_fields(record: &str, columns: usize) -> Result<Vec<Option<String>>, String> {
    let inner = record.strip_prefix('(')
                    .and_then(|rest| rest.strip_suffix(')'))
                    .ok_or_else(|| format!("not a record: {}", record))?;

    if columns == 0 {
        return Ok(Vec::new())
    }

    let mut fields = Vec::with_capacity(columns);
    let mut chars = inner.chars().peekable();

    loop {
        let mut value = String::new();
        let mut quoted = false;

        let more = loop {
            match chars.next() {
                None => break false,
                Some(',') => break true,
                Some('"') => {
                    quoted = true;
                    loop {
                        match chars.next() {
                            Some('"') if chars.peek() == Some(&'"') => {
                                chars.next();
                                value.push('"');
                            },
                            Some('"') => break,
                            Some('\\') => value.extend(chars.next()),
                            Some(c) => value.push(c),
                            None => return Err(format!("unterminated quote in {}", record))
                        }
                    }
                },
                Some('\\') => value.extend(chars.next()),
                Some(c) => value.push(c)
            }
        };

        fields.push(if value.is_empty() && !quoted { None } else { Some(value) });

        if !more {
            return Ok(fields)
        }
    }
}

/// Owns the one connection the whole session runs on. Dropping the executor
/// closes the connection.
pub struct QueryExecutor{
    conn: PgConnection
}

impl QueryExecutor{
    #[tracing::instrument(
        "Connecting to database",
        skip_all,
        fields(host = %settings.host, port = settings.port, database = %settings.name)
    )]
    pub fn connect(settings: &DatabaseSettings) -> Result<Self, DatabaseError> {
        let conn = PgConnection::establish(&settings.connection_url())?;
        Ok(Self::from_connection(conn))
    }

    pub fn from_connection(conn: PgConnection) -> Self {
        QueryExecutor{ conn }
    }

    /// Runs a statement that returns no rows, yielding the affected row count.
    #[tracing::instrument(
        "Executing update",
        skip_all,
        fields(sql = %statement.sql())
    )]
    pub fn execute_update(&mut self, statement: &Statement) -> Result<usize, DatabaseError> {
        Ok(statement.to_query().execute(&mut self.conn)?)
    }

    /// Runs a query and returns every row.
    #[tracing::instrument(
        "Executing query",
        skip_all,
        fields(sql = %statement.sql())
    )]
    pub fn execute_query_and_return_result(&mut self, statement: &Statement) -> Result<Vec<Row>, DatabaseError> {
        Ok(self.load_rows(statement)?
            .into_iter()
            .map(OrderedRow::into_values)
            .collect())
    }

    /// Runs a query and writes it to `out`: a header of column names, then one
    /// line per row, every value followed by a tab. Nothing is written for an
    /// empty result. Returns the row count.
    #[tracing::instrument(
        "Executing query for display",
        skip_all,
        fields(sql = %statement.sql())
    )]
    pub fn execute_query_and_print_result<W>(&mut self, statement: &Statement, out: &mut W) -> Result<usize, DatabaseError>
    where
        W: Write + ?Sized
    {
        let rows = self.load_rows(statement)?;

        if let Some(first) = rows.first() {
            for name in first.column_names() {
                write!(out, "{}\t", name)?;
            }
            writeln!(out)?;
        }

        for row in rows.iter() {
            for (_, value) in row.0.iter() {
                write!(out, "{}\t", value.as_deref().unwrap_or("null"))?;
            }
            writeln!(out)?;
        }

        Ok(rows.len())
    }

    /// Runs a query and returns how many rows it produced.
    #[tracing::instrument(
        "Counting query rows",
        skip_all,
        fields(sql = %statement.sql())
    )]
    pub fn execute_query(&mut self, statement: &Statement) -> Result<usize, DatabaseError> {
        let counted = statement.wrapped(|body| {
            format!("WITH counted AS (\n{}\n)\nSELECT COUNT(*) AS count FROM counted", body)
        });

        let row = counted.to_query().get_result::<CountRow>(&mut self.conn)?;
        Ok(usize::try_from(row.count).unwrap_or_default())
    }

    pub fn transaction<T, E, F>(&mut self, f: F) -> Result<T, E>
    where
        F: FnOnce(&mut PgConnection) -> Result<T, E>,
        E: From<diesel::result::Error>
    {
        self.conn.transaction(f)
    }

    // Direct access for typed diesel queries
    pub fn connection(&mut self) -> &mut PgConnection {
        &mut self.conn
    }

    pub fn close(self){
        tracing::info!("Closing database connection");
        drop(self.conn);
    }

    fn load_rows(&mut self, statement: &Statement) -> Result<Vec<OrderedRow>, DatabaseError> {
        let as_text = statement.wrapped(|body| {
            format!(
                "WITH statement_rows AS (\n{}\n)\n\
                 SELECT row_to_json(statement_rows)::text AS row, statement_rows::text AS record \
                 FROM statement_rows",
                body
            )
        });

        as_text.to_query()
            .load::<ResultRow>(&mut self.conn)?
            .iter()
            .map(OrderedRow::parse)
            .collect()
    }
}
