//! Builds DDL, parameterized INSERT, and the ZIP/measure join from validated names.

use crate::config::LookupTables;
use crate::sql::ident::quoted;

pub struct QueryBuf {
    pub sql: String,
    pub params: Vec<String>,
}

impl QueryBuf {
    fn new() -> Self {
        QueryBuf {
            sql: String::new(),
            params: Vec::new(),
        }
    }

    fn push_param(&mut self, v: impl Into<String>) -> usize {
        self.params.push(v.into());
        self.params.len()
    }
}

/// Output key and source column in the measure table, in response order.
pub const MEASURE_COLUMNS: [(&str, &str); 14] = [
    ("state", "State"),
    ("county", "County"),
    ("state_code", "State_code"),
    ("county_code", "County_code"),
    ("year_span", "Year_span"),
    ("measure_name", "Measure_name"),
    ("measure_id", "Measure_id"),
    ("numerator", "Numerator"),
    ("denominator", "Denominator"),
    ("raw_value", "Raw_value"),
    ("confidence_interval_lower_bound", "Confidence_Interval_Lower_Bound"),
    ("confidence_interval_upper_bound", "Confidence_Interval_Upper_Bound"),
    ("data_release_year", "Data_Release_Year"),
    ("fipscode", "fipscode"),
];

pub fn drop_table(table: &str) -> String {
    format!("DROP TABLE IF EXISTS {}", quoted(table))
}

/// CREATE TABLE with one TEXT column per name, in order.
pub fn create_table(table: &str, columns: &[String]) -> String {
    let defs = columns
        .iter()
        .map(|c| format!("{} TEXT", quoted(c)))
        .collect::<Vec<_>>()
        .join(", ");
    format!("CREATE TABLE {} ({})", quoted(table), defs)
}

/// INSERT with one positional placeholder per column. Caller binds the row.
pub fn insert_row(table: &str, columns: &[String]) -> String {
    let cols = columns.iter().map(|c| quoted(c)).collect::<Vec<_>>().join(", ");
    let placeholders = (1..=columns.len())
        .map(|n| format!("?{}", n))
        .collect::<Vec<_>>()
        .join(", ");
    format!("INSERT INTO {} ({}) VALUES ({})", quoted(table), cols, placeholders)
}

/// SELECT every column of a table as text, in storage order.
pub fn select_all_text(table: &str, columns: &[String]) -> String {
    let cols = columns
        .iter()
        .map(|c| format!("CAST({} AS TEXT)", quoted(c)))
        .collect::<Vec<_>>()
        .join(", ");
    format!("SELECT {} FROM {} ORDER BY rowid", cols, quoted(table))
}

/// Join the ZIP/county mapping to the measure table on (state, county), filtered by ZIP and
/// measure, ordered by data release year ascending. Params: zip, measure name.
pub fn select_measures_for_zip(tables: &LookupTables, zip: &str, measure_name: &str) -> QueryBuf {
    const ZIP_ALIAS: &str = "zc";
    const MEASURE_ALIAS: &str = "chr";
    let mut q = QueryBuf::new();

    let select_parts: Vec<String> = MEASURE_COLUMNS
        .iter()
        .map(|(key, col)| format!("CAST({}.{} AS TEXT) AS {}", MEASURE_ALIAS, quoted(col), quoted(key)))
        .collect();

    let zip_ph = q.push_param(zip);
    let measure_ph = q.push_param(measure_name);
    q.sql = format!(
        "SELECT {} FROM {} {zc} JOIN {} {chr} ON {zc}.{} = {chr}.{} AND {zc}.{} = {chr}.{} \
         WHERE {zc}.{} = ?{} AND {chr}.{} = ?{} ORDER BY {chr}.{} ASC, {chr}.rowid ASC",
        select_parts.join(", "),
        quoted(&tables.zip_table),
        quoted(&tables.measure_table),
        quoted("county_state"),
        quoted("State"),
        quoted("county"),
        quoted("County"),
        quoted("zip"),
        zip_ph,
        quoted("Measure_name"),
        measure_ph,
        quoted("Data_Release_Year"),
        zc = ZIP_ALIAS,
        chr = MEASURE_ALIAS,
    );
    q
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cols(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn create_table_declares_text_columns_in_order() {
        assert_eq!(
            create_table("people", &cols(&["id", "name"])),
            "CREATE TABLE \"people\" (\"id\" TEXT, \"name\" TEXT)"
        );
    }

    #[test]
    fn insert_row_uses_placeholders() {
        let sql = insert_row("people", &cols(&["id", "name", "age"]));
        assert_eq!(sql, "INSERT INTO \"people\" (\"id\", \"name\", \"age\") VALUES (?1, ?2, ?3)");
    }

    #[test]
    fn lookup_binds_values_and_orders_by_release_year() {
        let q = select_measures_for_zip(&LookupTables::default(), "02138", "Adult obesity");
        assert_eq!(q.params, vec!["02138".to_string(), "Adult obesity".to_string()]);
        assert!(!q.sql.contains("02138"));
        assert!(q.sql.contains("FROM \"zip_county\" zc JOIN \"county_health_rankings\" chr"));
        assert!(q.sql.contains("WHERE zc.\"zip\" = ?1 AND chr.\"Measure_name\" = ?2"));
        assert!(q.sql.contains("ORDER BY chr.\"Data_Release_Year\" ASC"));
        assert!(q.sql.contains("CAST(chr.\"fipscode\" AS TEXT) AS \"fipscode\""));
    }
}
