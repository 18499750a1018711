// ==========================================
// 坐标测量质检系统 - 测量数据仓储
// ==========================================
// 红线: Repository 不含业务逻辑
// 红线: 测量点集落库后只读（无更新接口）
// ==========================================

use crate::db::open_sqlite_connection;
use crate::domain::measurement::{DataPoint, MeasurementFile};
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::sync::{Arc, Mutex, MutexGuard};

// ==========================================
// DataPointSource Trait
// ==========================================
// 用途: 报告生成读取测量点集（每次请求重新读取，不缓存）
// 实现者: MeasurementRepository
pub trait DataPointSource: Send + Sync {
    /// 读取文件的全部测量点（按原始顺序）
    ///
    /// # 返回
    /// - Ok(Vec<DataPoint>): 测量点（可能为空）
    /// - Err(NotFound): 文件不存在
    fn load_data_points(&self, file_id: &str) -> RepositoryResult<Vec<DataPoint>>;
}

// ==========================================
// MeasurementRepository - 测量文件/测量点仓储
// ==========================================
/// 职责: 管理 measurement_file / data_point 表
pub struct MeasurementRepository {
    conn: Arc<Mutex<Connection>>,
}

impl MeasurementRepository {
    /// 创建新的 MeasurementRepository 实例
    pub fn new(db_path: &str) -> RepositoryResult<Self> {
        let conn = open_sqlite_connection(db_path)
            .map_err(|e| RepositoryError::DatabaseConnectionError(e.to_string()))?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// 从已有连接创建仓储实例
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    /// 获取数据库连接
    fn get_conn(&self) -> RepositoryResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// 写入文件头与全部测量点（单事务）
    pub fn insert_file(&self, file: &MeasurementFile, points: &[DataPoint]) -> RepositoryResult<()> {
        let mut conn = self.get_conn()?;
        let tx = conn
            .transaction()
            .map_err(|e| RepositoryError::DatabaseTransactionError(e.to_string()))?;

        tx.execute(
            r#"
            INSERT INTO measurement_file (file_id, file_name, point_count, skipped_lines, imported_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
            params![
                file.file_id,
                file.file_name,
                file.point_count as i64,
                file.skipped_lines as i64,
                file.imported_at,
            ],
        )?;

        {
            let mut stmt = tx.prepare(
                r#"
                INSERT INTO data_point (
                    file_id, seq_no, point_index, type_tag,
                    x, y, z, rot_x, rot_y, rot_z,
                    note, diameter, tolerance
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)
                "#,
            )?;

            for (seq_no, p) in points.iter().enumerate() {
                stmt.execute(params![
                    file.file_id,
                    seq_no as i64,
                    p.index,
                    p.type_tag,
                    p.x,
                    p.y,
                    p.z,
                    p.rot_x,
                    p.rot_y,
                    p.rot_z,
                    p.note,
                    p.diameter,
                    p.tolerance,
                ])?;
            }
        }

        tx.commit()
            .map_err(|e| RepositoryError::DatabaseTransactionError(e.to_string()))?;
        Ok(())
    }

    /// 按文件ID查询文件头
    pub fn find_file(&self, file_id: &str) -> RepositoryResult<Option<MeasurementFile>> {
        let conn = self.get_conn()?;
        let file = conn
            .query_row(
                r#"
                SELECT file_id, file_name, point_count, skipped_lines, imported_at
                FROM measurement_file
                WHERE file_id = ?1
                "#,
                params![file_id],
                map_file_row,
            )
            .optional()?;
        Ok(file)
    }

    /// 列出全部文件（导入时间倒序）
    pub fn list_files(&self) -> RepositoryResult<Vec<MeasurementFile>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT file_id, file_name, point_count, skipped_lines, imported_at
            FROM measurement_file
            ORDER BY imported_at DESC, file_id
            "#,
        )?;

        let files = stmt
            .query_map([], map_file_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(files)
    }

    /// 删除文件（测量点级联删除）
    ///
    /// # 返回
    /// - Ok(true): 已删除
    /// - Ok(false): 文件不存在
    pub fn delete_file(&self, file_id: &str) -> RepositoryResult<bool> {
        let conn = self.get_conn()?;
        let affected = conn.execute(
            "DELETE FROM measurement_file WHERE file_id = ?1",
            params![file_id],
        )?;
        Ok(affected > 0)
    }
}

impl DataPointSource for MeasurementRepository {
    fn load_data_points(&self, file_id: &str) -> RepositoryResult<Vec<DataPoint>> {
        let conn = self.get_conn()?;

        let exists: bool = conn
            .query_row(
                "SELECT 1 FROM measurement_file WHERE file_id = ?1",
                params![file_id],
                |_row| Ok(true),
            )
            .optional()?
            .unwrap_or(false);
        if !exists {
            return Err(RepositoryError::NotFound {
                entity: "MeasurementFile".to_string(),
                id: file_id.to_string(),
            });
        }

        let mut stmt = conn.prepare(
            r#"
            SELECT point_index, type_tag, x, y, z, rot_x, rot_y, rot_z, note, diameter, tolerance
            FROM data_point
            WHERE file_id = ?1
            ORDER BY seq_no ASC
            "#,
        )?;

        let points = stmt
            .query_map(params![file_id], |row| {
                Ok(DataPoint {
                    index: row.get(0)?,
                    type_tag: row.get(1)?,
                    x: row.get(2)?,
                    y: row.get(3)?,
                    z: row.get(4)?,
                    rot_x: row.get(5)?,
                    rot_y: row.get(6)?,
                    rot_z: row.get(7)?,
                    note: row.get(8)?,
                    diameter: row.get(9)?,
                    tolerance: row.get(10)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        tracing::debug!(file_id, points = points.len(), "读取测量点集");
        Ok(points)
    }
}

fn map_file_row(row: &Row<'_>) -> rusqlite::Result<MeasurementFile> {
    Ok(MeasurementFile {
        file_id: row.get(0)?,
        file_name: row.get(1)?,
        point_count: row.get::<_, i64>(2)?.max(0) as usize,
        skipped_lines: row.get::<_, i64>(3)?.max(0) as usize,
        imported_at: row.get(4)?,
    })
}
