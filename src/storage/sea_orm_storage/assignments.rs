//! 作业存储操作

use super::SeaOrmStorage;
use crate::entity::assignments::{ActiveModel, Column, Entity as Assignments};
use crate::entity::lessons::{Column as LessonColumn, Entity as Lessons};
use crate::errors::{CourseHubError, Result};
use crate::models::{
    PaginationInfo,
    assignments::{
        entities::Assignment,
        requests::{AssignmentListQuery, CreateAssignmentRequest, UpdateAssignmentRequest},
        responses::AssignmentListResponse,
    },
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};

impl SeaOrmStorage {
    /// 创建作业
    pub async fn create_assignment_impl(
        &self,
        created_by: i64,
        req: CreateAssignmentRequest,
    ) -> Result<Assignment> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            lesson_id: Set(req.lesson_id),
            created_by: Set(created_by),
            title: Set(req.title),
            description: Set(req.description),
            due_at: Set(req.due_at.map(|dt| dt.timestamp())),
            max_score: Set(req.max_score),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| CourseHubError::database_operation(format!("创建作业失败: {e}")))?;

        Ok(result.into_assignment())
    }

    /// 通过 ID 获取作业
    pub async fn get_assignment_by_id_impl(&self, id: i64) -> Result<Option<Assignment>> {
        let result = Assignments::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| CourseHubError::database_operation(format!("查询作业失败: {e}")))?;

        Ok(result.map(|m| m.into_assignment()))
    }

    /// 更新作业（部分字段）
    pub async fn update_assignment_impl(
        &self,
        id: i64,
        update: UpdateAssignmentRequest,
    ) -> Result<Option<Assignment>> {
        let existing = Assignments::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| CourseHubError::database_operation(format!("查询作业失败: {e}")))?;

        let Some(existing) = existing else {
            return Ok(None);
        };

        let mut model: ActiveModel = existing.into();
        if let Some(title) = update.title {
            model.title = Set(title);
        }
        if let Some(description) = update.description {
            model.description = Set(Some(description));
        }
        if let Some(due_at) = update.due_at {
            model.due_at = Set(Some(due_at.timestamp()));
        }
        if let Some(max_score) = update.max_score {
            model.max_score = Set(max_score);
        }
        model.updated_at = Set(chrono::Utc::now().timestamp());

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| CourseHubError::database_operation(format!("更新作业失败: {e}")))?;

        Ok(Some(result.into_assignment()))
    }

    /// 删除作业
    pub async fn delete_assignment_impl(&self, id: i64) -> Result<bool> {
        let result = Assignments::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| CourseHubError::database_operation(format!("删除作业失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 列出作业（分页，可按课时或课程筛选）
    pub async fn list_assignments_with_pagination_impl(
        &self,
        query: AssignmentListQuery,
    ) -> Result<AssignmentListResponse> {
        let page = query.page.unwrap_or(1).max(1) as u64;
        let size = query.size.unwrap_or(10).clamp(1, 100) as u64;

        let mut select = Assignments::find();

        // 课时筛选
        if let Some(lesson_id) = query.lesson_id {
            select = select.filter(Column::LessonId.eq(lesson_id));
        }

        // 课程筛选（通过课时子查询）
        if let Some(course_id) = query.course_id {
            let lesson_ids = Lessons::find()
                .filter(LessonColumn::CourseId.eq(course_id))
                .select_only()
                .column(LessonColumn::Id)
                .into_tuple::<i64>()
                .all(&self.db)
                .await
                .map_err(|e| {
                    CourseHubError::database_operation(format!("查询课程课时失败: {e}"))
                })?;
            select = select.filter(Column::LessonId.is_in(lesson_ids));
        }

        // 排序：创建顺序
        select = select.order_by_asc(Column::CreatedAt).order_by_asc(Column::Id);

        // 分页查询
        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| CourseHubError::database_operation(format!("查询作业总数失败: {e}")))?;

        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| CourseHubError::database_operation(format!("查询作业页数失败: {e}")))?;

        let assignments = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| CourseHubError::database_operation(format!("查询作业列表失败: {e}")))?;

        Ok(AssignmentListResponse {
            items: assignments
                .into_iter()
                .map(|m| m.into_assignment())
                .collect(),
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }

    /// 列出多个课时下的全部作业，按创建顺序排序
    pub async fn list_assignments_for_lessons_impl(
        &self,
        lesson_ids: Vec<i64>,
    ) -> Result<Vec<Assignment>> {
        if lesson_ids.is_empty() {
            return Ok(vec![]);
        }

        let results = Assignments::find()
            .filter(Column::LessonId.is_in(lesson_ids))
            .order_by_asc(Column::CreatedAt)
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| CourseHubError::database_operation(format!("查询作业列表失败: {e}")))?;

        Ok(results.into_iter().map(|m| m.into_assignment()).collect())
    }
}
