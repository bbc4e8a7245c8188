//! 测试辅助：内存 SQLite 存储与种子数据

use std::sync::Arc;

use super::Storage;
use super::sea_orm_storage::SeaOrmStorage;
use crate::models::exams::entities::Exam;
use crate::models::exams::requests::CreateExamRequest;
use crate::models::students::entities::Student;
use crate::models::students::requests::CreateStudentRequest;
use crate::models::subjects::entities::Subject;
use crate::models::subjects::requests::CreateSubjectRequest;
use crate::models::users::entities::{User, UserRole};
use crate::models::users::requests::CreateUserRequest;

pub async fn memory_storage() -> SeaOrmStorage {
    SeaOrmStorage::connect("sqlite::memory:")
        .await
        .expect("in-memory sqlite should open")
}

pub fn as_dyn(storage: &SeaOrmStorage) -> Arc<dyn Storage> {
    Arc::new(storage.clone())
}

pub async fn seed_user(storage: &SeaOrmStorage, username: &str, role: UserRole) -> User {
    storage
        .create_user_impl(CreateUserRequest {
            username: username.to_string(),
            email: format!("{username}@campus.local"),
            password: crate::utils::password::hash_password("Campus#2025").unwrap(),
            role,
            display_name: None,
        })
        .await
        .unwrap()
}

pub async fn seed_student(
    storage: &SeaOrmStorage,
    name: &str,
    roll: &str,
    branch: &str,
    semester: &str,
) -> Student {
    storage
        .create_student_impl(CreateStudentRequest {
            name: name.to_string(),
            roll: roll.to_string(),
            branch: branch.to_string(),
            semester: semester.to_string(),
            section: None,
        })
        .await
        .unwrap()
}

pub async fn seed_subject(
    storage: &SeaOrmStorage,
    name: &str,
    code: &str,
    branch: &str,
    semester: i32,
) -> Subject {
    storage
        .create_subject_impl(CreateSubjectRequest {
            name: name.to_string(),
            code: code.to_string(),
            branch: branch.to_string(),
            semester: Some(semester),
        })
        .await
        .unwrap()
}

pub async fn seed_exam(storage: &SeaOrmStorage, paper_setter: i64, batch_code: &str) -> Exam {
    storage
        .create_exam_impl(
            paper_setter,
            CreateExamRequest {
                name: "Mid Term 1".to_string(),
                subject_name: "Maths".to_string(),
                subject_code: Some("MAT101".to_string()),
                sem: "sem1".to_string(),
                batch_code: batch_code.to_string(),
                max_marks: Some(100.0),
                exam_date: None,
                description: None,
            },
        )
        .await
        .unwrap()
}
