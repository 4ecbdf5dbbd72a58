use std::str::FromStr;

use chrono::NaiveDateTime;
use rusqlite::{params, Connection};
use uuid::Uuid;

use crate::db::DatabaseError;
use crate::models::{RiskCategory, ScoreType, StoredMeasurement};

const MEASUREMENT_COLUMNS: &str = "id, patient_id, organization_id, score_type, score_value, \
     risk_percentage, risk_category, recommendations, calculated_by, calculated_at";

/// Insert a measurement row. Rows are immutable; there is no update path.
pub fn insert_measurement(
    conn: &Connection,
    measurement: &StoredMeasurement,
) -> Result<(), DatabaseError> {
    let recommendations = serde_json::to_string(&measurement.recommendations)?;
    conn.execute(
        "INSERT INTO score_measurements (id, patient_id, organization_id, score_type, score_value, risk_percentage, risk_category, recommendations, calculated_by, calculated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
        params![
            measurement.id.to_string(),
            measurement.patient_id.to_string(),
            measurement.organization_id.to_string(),
            measurement.score_type.as_str(),
            measurement.score_value,
            measurement.risk_percentage,
            measurement.risk_category.as_str(),
            recommendations,
            measurement.calculated_by,
            measurement.calculated_at.format("%Y-%m-%d %H:%M:%S").to_string(),
        ],
    )?;
    Ok(())
}

/// All measurements for a patient in an organization, newest first.
/// A `None` limit returns the full history.
pub fn get_measurement_history(
    conn: &Connection,
    patient_id: &Uuid,
    organization_id: &Uuid,
    limit: Option<usize>,
) -> Result<Vec<StoredMeasurement>, DatabaseError> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {MEASUREMENT_COLUMNS}
         FROM score_measurements
         WHERE patient_id = ?1 AND organization_id = ?2
         ORDER BY calculated_at DESC, rowid DESC
         LIMIT ?3",
    ))?;
    let rows = stmt.query_map(
        params![
            patient_id.to_string(),
            organization_id.to_string(),
            sql_limit(limit),
        ],
        row_to_measurement,
    )?;
    rows.collect::<Result<Vec<_>, _>>()
        .map_err(DatabaseError::from)
}

/// Measurements of one score type for a patient, newest first.
pub fn get_measurement_history_by_type(
    conn: &Connection,
    patient_id: &Uuid,
    organization_id: &Uuid,
    score_type: ScoreType,
    limit: Option<usize>,
) -> Result<Vec<StoredMeasurement>, DatabaseError> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {MEASUREMENT_COLUMNS}
         FROM score_measurements
         WHERE patient_id = ?1 AND organization_id = ?2 AND score_type = ?3
         ORDER BY calculated_at DESC, rowid DESC
         LIMIT ?4",
    ))?;
    let rows = stmt.query_map(
        params![
            patient_id.to_string(),
            organization_id.to_string(),
            score_type.as_str(),
            sql_limit(limit),
        ],
        row_to_measurement,
    )?;
    rows.collect::<Result<Vec<_>, _>>()
        .map_err(DatabaseError::from)
}

/// The most recent measurement of one score type, if any.
pub fn get_latest_measurement(
    conn: &Connection,
    patient_id: &Uuid,
    organization_id: &Uuid,
    score_type: ScoreType,
) -> Result<Option<StoredMeasurement>, DatabaseError> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {MEASUREMENT_COLUMNS}
         FROM score_measurements
         WHERE patient_id = ?1 AND organization_id = ?2 AND score_type = ?3
         ORDER BY calculated_at DESC, rowid DESC
         LIMIT 1",
    ))?;
    let mut rows = stmt.query_map(
        params![
            patient_id.to_string(),
            organization_id.to_string(),
            score_type.as_str(),
        ],
        row_to_measurement,
    )?;
    match rows.next() {
        Some(row) => Ok(Some(row?)),
        None => Ok(None),
    }
}

/// Number of stored measurements for a patient in an organization.
pub fn count_measurements(
    conn: &Connection,
    patient_id: &Uuid,
    organization_id: &Uuid,
) -> Result<usize, DatabaseError> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM score_measurements WHERE patient_id = ?1 AND organization_id = ?2",
        params![patient_id.to_string(), organization_id.to_string()],
        |row| row.get(0),
    )?;
    Ok(count as usize)
}

// SQLite reads LIMIT -1 as unlimited.
fn sql_limit(limit: Option<usize>) -> i64 {
    limit.map_or(-1, |n| n as i64)
}

fn row_to_measurement(row: &rusqlite::Row) -> Result<StoredMeasurement, rusqlite::Error> {
    let type_str: String = row.get(3)?;
    let category_str: String = row.get(6)?;
    let recommendations_str: String = row.get(7)?;
    let calculated_str: String = row.get(9)?;

    Ok(StoredMeasurement {
        id: parse_uuid(row, 0)?,
        patient_id: parse_uuid(row, 1)?,
        organization_id: parse_uuid(row, 2)?,
        score_type: ScoreType::from_str(&type_str).map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(3, rusqlite::types::Type::Text, Box::new(e))
        })?,
        score_value: row.get(4)?,
        risk_percentage: row.get(5)?,
        risk_category: RiskCategory::from_str(&category_str).map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(6, rusqlite::types::Type::Text, Box::new(e))
        })?,
        recommendations: serde_json::from_str(&recommendations_str).unwrap_or_default(),
        calculated_by: row.get(8)?,
        calculated_at: NaiveDateTime::parse_from_str(&calculated_str, "%Y-%m-%d %H:%M:%S")
            .unwrap_or_default(),
    })
}

fn parse_uuid(row: &rusqlite::Row, idx: usize) -> Result<Uuid, rusqlite::Error> {
    let id_str: String = row.get(idx)?;
    Uuid::parse_str(&id_str).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(e))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::sqlite::open_memory_database;

    fn test_db() -> Connection {
        open_memory_database().unwrap()
    }

    fn make_measurement(
        patient_id: Uuid,
        organization_id: Uuid,
        score_type: ScoreType,
        score_value: f64,
        calculated_at: &str,
    ) -> StoredMeasurement {
        StoredMeasurement {
            id: Uuid::new_v4(),
            patient_id,
            organization_id,
            score_type,
            score_value,
            risk_percentage: 12.5,
            risk_category: RiskCategory::Moderate,
            recommendations: vec![
                "Smoking cessation is strongly recommended.".into(),
                "Maintain regular physical activity and a heart-healthy diet.".into(),
            ],
            calculated_by: "dr.osei".into(),
            calculated_at: NaiveDateTime::parse_from_str(calculated_at, "%Y-%m-%d %H:%M:%S")
                .unwrap(),
        }
    }

    #[test]
    fn insert_and_retrieve_round_trip() {
        let conn = test_db();
        let patient = Uuid::new_v4();
        let org = Uuid::new_v4();
        let m = make_measurement(patient, org, ScoreType::Framingham, 13.0, "2025-03-01 10:00:00");
        insert_measurement(&conn, &m).unwrap();

        let history = get_measurement_history(&conn, &patient, &org, None).unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].id, m.id);
        assert_eq!(history[0].score_type, ScoreType::Framingham);
        assert_eq!(history[0].risk_category, RiskCategory::Moderate);
        assert_eq!(history[0].recommendations.len(), 2);
        assert_eq!(history[0].calculated_by, "dr.osei");
        assert_eq!(history[0].calculated_at, m.calculated_at);
    }

    #[test]
    fn history_is_newest_first() {
        let conn = test_db();
        let patient = Uuid::new_v4();
        let org = Uuid::new_v4();
        for (value, at) in [
            (2.0, "2025-03-01 09:00:00"),
            (4.0, "2025-03-03 09:00:00"),
            (3.0, "2025-03-02 09:00:00"),
        ] {
            insert_measurement(
                &conn,
                &make_measurement(patient, org, ScoreType::ChadsVasc, value, at),
            )
            .unwrap();
        }

        let history = get_measurement_history(&conn, &patient, &org, None).unwrap();
        let values: Vec<f64> = history.iter().map(|m| m.score_value).collect();
        assert_eq!(values, vec![4.0, 3.0, 2.0]);
    }

    #[test]
    fn same_timestamp_orders_by_insertion() {
        let conn = test_db();
        let patient = Uuid::new_v4();
        let org = Uuid::new_v4();
        for value in [1.0, 2.0, 3.0] {
            insert_measurement(
                &conn,
                &make_measurement(patient, org, ScoreType::Timi, value, "2025-03-01 09:00:00"),
            )
            .unwrap();
        }

        let history = get_measurement_history(&conn, &patient, &org, None).unwrap();
        let values: Vec<f64> = history.iter().map(|m| m.score_value).collect();
        assert_eq!(values, vec![3.0, 2.0, 1.0]);
    }

    #[test]
    fn limit_caps_history() {
        let conn = test_db();
        let patient = Uuid::new_v4();
        let org = Uuid::new_v4();
        for day in 1..=5 {
            insert_measurement(
                &conn,
                &make_measurement(
                    patient,
                    org,
                    ScoreType::Grace,
                    f64::from(day),
                    &format!("2025-03-0{day} 09:00:00"),
                ),
            )
            .unwrap();
        }

        let history = get_measurement_history(&conn, &patient, &org, Some(2)).unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].score_value, 5.0);
        assert_eq!(history[1].score_value, 4.0);
    }

    #[test]
    fn history_by_type_filters() {
        let conn = test_db();
        let patient = Uuid::new_v4();
        let org = Uuid::new_v4();
        insert_measurement(
            &conn,
            &make_measurement(patient, org, ScoreType::Ascvd, 7.9, "2025-03-01 09:00:00"),
        )
        .unwrap();
        insert_measurement(
            &conn,
            &make_measurement(patient, org, ScoreType::Heart, 5.0, "2025-03-01 10:00:00"),
        )
        .unwrap();

        let ascvd = get_measurement_history_by_type(&conn, &patient, &org, ScoreType::Ascvd, None)
            .unwrap();
        assert_eq!(ascvd.len(), 1);
        assert_eq!(ascvd[0].score_value, 7.9);
    }

    #[test]
    fn latest_returns_newest_of_type() {
        let conn = test_db();
        let patient = Uuid::new_v4();
        let org = Uuid::new_v4();
        insert_measurement(
            &conn,
            &make_measurement(patient, org, ScoreType::Heart, 4.0, "2025-03-01 09:00:00"),
        )
        .unwrap();
        insert_measurement(
            &conn,
            &make_measurement(patient, org, ScoreType::Heart, 6.0, "2025-03-04 09:00:00"),
        )
        .unwrap();

        let latest = get_latest_measurement(&conn, &patient, &org, ScoreType::Heart)
            .unwrap()
            .unwrap();
        assert_eq!(latest.score_value, 6.0);
    }

    #[test]
    fn latest_returns_none_for_empty() {
        let conn = test_db();
        let latest =
            get_latest_measurement(&conn, &Uuid::new_v4(), &Uuid::new_v4(), ScoreType::Cac)
                .unwrap();
        assert!(latest.is_none());
    }

    #[test]
    fn organization_scopes_every_query() {
        let conn = test_db();
        let patient = Uuid::new_v4();
        let org_a = Uuid::new_v4();
        let org_b = Uuid::new_v4();
        insert_measurement(
            &conn,
            &make_measurement(patient, org_a, ScoreType::HasBled, 3.0, "2025-03-01 09:00:00"),
        )
        .unwrap();
        insert_measurement(
            &conn,
            &make_measurement(patient, org_b, ScoreType::HasBled, 1.0, "2025-03-02 09:00:00"),
        )
        .unwrap();

        let in_a = get_measurement_history(&conn, &patient, &org_a, None).unwrap();
        assert_eq!(in_a.len(), 1);
        assert_eq!(in_a[0].score_value, 3.0);
        assert_eq!(count_measurements(&conn, &patient, &org_a).unwrap(), 1);
        assert_eq!(count_measurements(&conn, &patient, &org_b).unwrap(), 1);
    }

    #[test]
    fn duplicate_id_rejected() {
        let conn = test_db();
        let patient = Uuid::new_v4();
        let org = Uuid::new_v4();
        let m = make_measurement(patient, org, ScoreType::Timi, 2.0, "2025-03-01 09:00:00");
        insert_measurement(&conn, &m).unwrap();
        let result = insert_measurement(&conn, &m);
        assert!(matches!(result, Err(DatabaseError::Sqlite(_))));
    }
}
