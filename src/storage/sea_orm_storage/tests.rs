use chrono::NaiveDate;
use sea_orm::{ActiveModelTrait, EntityTrait, Set};

use super::SeaOrmStorage;
use crate::errors::SchoolError;
use crate::entity::prelude::{Attendance as AttendanceRecords, EnrollmentActiveModel};
use crate::models::{
    attendance::{AttendanceStatus, requests::AttendanceEntry},
    classes::requests::{CreateClassRequest, UpdateClassRequest},
    enrollments::{EnrollmentOutcome, EnrollmentRejection, UnenrollmentOutcome},
    grades::{
        GradeType,
        requests::{CreateGradeRequest, GradeListQuery, UpdateGradeRequest},
    },
    notes::CreateNoteRequest,
    schedules::{CreateScheduleRequest, Weekday},
    students::{StudentProfile, requests::CreateStudentProfileRequest},
    subjects::{Subject, requests::CreateSubjectRequest},
    teachers::{Qualification, requests::CreateTeacherProfileRequest},
    users::{
        User, UserRole,
        requests::{CreateUserRequest, UpdateUserRequest, UserListQuery},
    },
};
use crate::storage::Storage;
use crate::utils::dates::parse_time;

pub(crate) fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub(crate) async fn seed_user(storage: &SeaOrmStorage, username: &str, role: UserRole) -> User {
    storage
        .create_user(CreateUserRequest {
            username: username.to_string(),
            email: format!("{username}@school.test"),
            password: "hashed".to_string(),
            role,
            first_name: "Test".to_string(),
            last_name: username.to_string(),
            phone_number: None,
            date_of_birth: None,
            address: None,
        })
        .await
        .unwrap()
}

pub(crate) async fn seed_class(storage: &SeaOrmStorage, name: &str, capacity: i32) -> i64 {
    storage
        .create_class(CreateClassRequest {
            name: name.to_string(),
            description: None,
            academic_year: "2024-2025".to_string(),
            capacity: Some(capacity),
            is_active: None,
        })
        .await
        .unwrap()
        .id
}

pub(crate) async fn seed_subject(
    storage: &SeaOrmStorage,
    code: &str,
    class_id: i64,
    is_mandatory: bool,
    is_active: bool,
) -> Subject {
    storage
        .create_subject(CreateSubjectRequest {
            name: format!("Subject {code}"),
            code: code.to_string(),
            description: None,
            class_id,
            teacher_id: None,
            credits: None,
            is_mandatory: Some(is_mandatory),
            is_active: Some(is_active),
        })
        .await
        .unwrap()
}

pub(crate) async fn seed_student(storage: &SeaOrmStorage, username: &str, class_id: Option<i64>) -> StudentProfile {
    let user = seed_user(storage, username, UserRole::Student).await;
    storage
        .create_student_profile(CreateStudentProfileRequest {
            user_id: user.id,
            student_number: format!("S-{username}"),
            class_id,
            admission_date: date(2024, 9, 1),
            guardian_name: "Guardian".to_string(),
            guardian_phone: "555-0100".to_string(),
            guardian_email: None,
            emergency_contact: "555-0101".to_string(),
            medical_info: None,
            is_active: None,
        })
        .await
        .unwrap()
}

#[tokio::test]
async fn test_user_crud_and_search() {
    let storage = SeaOrmStorage::in_memory().await.unwrap();
    let admin = seed_user(&storage, "admin01", UserRole::Admin).await;
    seed_user(&storage, "teacher01", UserRole::Teacher).await;
    seed_user(&storage, "student01", UserRole::Student).await;

    let found = storage
        .get_user_by_username_or_email("teacher01@school.test")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found.username, "teacher01");

    let list = storage
        .list_users_with_pagination(UserListQuery {
            search: Some("student".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(list.pagination.total, 1);
    assert_eq!(list.items[0].username, "student01");

    assert_eq!(storage.count_users().await.unwrap(), 3);
    assert_eq!(storage.count_users_by_role(UserRole::Teacher).await.unwrap(), 1);

    let updated = storage
        .update_user(
            admin.id,
            UpdateUserRequest {
                first_name: Some("Head".to_string()),
                phone_number: Some("+1 555 0000".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.first_name, "Head");
    assert_eq!(updated.phone_number.as_deref(), Some("+1 555 0000"));

    assert!(storage.update_last_login(admin.id).await.unwrap());
    assert!(storage.get_user_by_id(admin.id).await.unwrap().unwrap().last_login.is_some());

    assert!(storage.delete_user(admin.id).await.unwrap());
    assert!(!storage.delete_user(admin.id).await.unwrap());
    assert!(storage.update_user(admin.id, UpdateUserRequest::default()).await.unwrap().is_none());
}

#[tokio::test]
async fn test_class_detail_counts() {
    let storage = SeaOrmStorage::in_memory().await.unwrap();
    let class_id = seed_class(&storage, "Grade 10A", 30).await;
    seed_subject(&storage, "MATH10", class_id, true, true).await;
    seed_subject(&storage, "ART10", class_id, false, true).await;
    seed_student(&storage, "pupil01", Some(class_id)).await;

    let detail = storage.get_class_detail(class_id).await.unwrap().unwrap();
    assert_eq!(detail.student_count, 1);
    assert_eq!(detail.subject_count, 2);
    assert!(!detail.is_full());

    let updated = storage
        .update_class(
            class_id,
            UpdateClassRequest {
                capacity: Some(1),
                ..Default::default()
            },
        )
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.capacity, 1);
    assert!(storage.get_class_detail(class_id).await.unwrap().unwrap().is_full());
}

#[tokio::test]
async fn test_delete_class_cascades_subjects_and_detaches_students() {
    let storage = SeaOrmStorage::in_memory().await.unwrap();
    let class_id = seed_class(&storage, "Grade 9B", 30).await;
    let subject = seed_subject(&storage, "BIO9", class_id, false, true).await;
    let student = seed_student(&storage, "pupil02", Some(class_id)).await;

    assert!(storage.delete_class(class_id).await.unwrap());
    assert!(storage.get_subject_by_id(subject.id).await.unwrap().is_none());
    let student = storage
        .get_student_profile_by_id(student.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(student.class_id, None);
}

#[tokio::test]
async fn test_enrollment_rules() {
    let storage = SeaOrmStorage::in_memory().await.unwrap();
    let class_id = seed_class(&storage, "Grade 11C", 30).await;
    let other_class = seed_class(&storage, "Grade 11D", 30).await;
    let elective = seed_subject(&storage, "CHEM11", class_id, false, true).await;
    let mandatory = seed_subject(&storage, "ENG11", class_id, true, true).await;
    let inactive = seed_subject(&storage, "LAT11", class_id, false, false).await;
    let foreign = seed_subject(&storage, "GEO11", other_class, false, true).await;
    let student = seed_student(&storage, "pupil03", Some(class_id)).await;

    let outcome = storage.enroll_student(&student, &elective, 8).await.unwrap();
    assert!(matches!(outcome, EnrollmentOutcome::Enrolled(_)));
    assert_eq!(outcome.message(), "Successfully enrolled in subject");

    let again = storage.enroll_student(&student, &elective, 8).await.unwrap();
    assert!(matches!(
        again,
        EnrollmentOutcome::Rejected(EnrollmentRejection::AlreadyEnrolled)
    ));

    let wrong_class = storage.enroll_student(&student, &foreign, 8).await.unwrap();
    assert_eq!(wrong_class.message(), "Subject is not available for your class");

    let not_active = storage.enroll_student(&student, &inactive, 8).await.unwrap();
    assert_eq!(not_active.message(), "Subject is not currently active");

    let limited = storage.enroll_student(&student, &mandatory, 1).await.unwrap();
    assert_eq!(limited.message(), "Maximum subject limit reached (1 subjects)");

    let enrolled = storage.enroll_student(&student, &mandatory, 8).await.unwrap();
    assert!(enrolled.is_success());
    assert_eq!(storage.count_active_enrollments(student.id).await.unwrap(), 2);

    let refused = storage.unenroll_student(student.id, &mandatory).await.unwrap();
    assert_eq!(refused, UnenrollmentOutcome::Mandatory);

    let left = storage.unenroll_student(student.id, &elective).await.unwrap();
    assert_eq!(left.message(), "Successfully unenrolled from Subject CHEM11");
    assert!(storage.get_enrollment(student.id, elective.id).await.unwrap().is_none());

    let missing = storage.unenroll_student(student.id, &elective).await.unwrap();
    assert_eq!(missing, UnenrollmentOutcome::NotEnrolled);
}

#[tokio::test]
async fn test_inactive_enrollment_is_reactivated() {
    let storage = SeaOrmStorage::in_memory().await.unwrap();
    let class_id = seed_class(&storage, "Grade 12A", 30).await;
    let subject = seed_subject(&storage, "PHY12", class_id, false, true).await;
    let student = seed_student(&storage, "pupil04", Some(class_id)).await;

    let EnrollmentOutcome::Enrolled(enrollment) =
        storage.enroll_student(&student, &subject, 8).await.unwrap()
    else {
        panic!("expected a new enrollment");
    };

    EnrollmentActiveModel {
        id: Set(enrollment.id),
        is_active: Set(false),
        ..Default::default()
    }
    .update(&storage.db)
    .await
    .unwrap();
    assert_eq!(storage.count_active_enrollments(student.id).await.unwrap(), 0);

    let outcome = storage.enroll_student(&student, &subject, 8).await.unwrap();
    assert_eq!(outcome.message(), "Successfully re-enrolled in subject");
    let EnrollmentOutcome::Reenrolled(reactivated) = outcome else {
        panic!("expected re-enrollment");
    };
    assert_eq!(reactivated.id, enrollment.id);
    assert!(reactivated.is_active);
}

#[tokio::test]
async fn test_available_subjects_and_overview_lists() {
    let storage = SeaOrmStorage::in_memory().await.unwrap();
    let class_id = seed_class(&storage, "Grade 8A", 30).await;
    let algebra = seed_subject(&storage, "ALG8", class_id, false, true).await;
    let drama = seed_subject(&storage, "DRA8", class_id, false, true).await;
    seed_subject(&storage, "OLD8", class_id, false, false).await;
    let student = seed_student(&storage, "pupil05", Some(class_id)).await;
    let homeless = seed_student(&storage, "pupil06", None).await;

    storage.enroll_student(&student, &algebra, 8).await.unwrap();

    let available = storage.list_available_subjects(&student).await.unwrap();
    assert_eq!(available.len(), 1);
    assert_eq!(available[0].id, drama.id);

    assert!(storage.list_available_subjects(&homeless).await.unwrap().is_empty());

    let enrolled = storage.list_student_enrollments(student.id).await.unwrap();
    assert_eq!(enrolled.len(), 1);
    assert_eq!(enrolled[0].subject.id, algebra.id);
    assert!(enrolled[0].can_unenroll);

    let students = storage.list_subject_students(algebra.id).await.unwrap();
    assert_eq!(students.len(), 1);
    assert_eq!(students[0].class_name.as_deref(), Some("Grade 8A"));

    let missing = storage
        .find_unenrolled_students(algebra.id, &[student.id, homeless.id, homeless.id])
        .await
        .unwrap();
    assert_eq!(missing, vec![homeless.id]);
}

#[tokio::test]
async fn test_attendance_upsert_by_student_subject_date() {
    let storage = SeaOrmStorage::in_memory().await.unwrap();
    let class_id = seed_class(&storage, "Grade 7A", 30).await;
    let subject = seed_subject(&storage, "HIS7", class_id, true, true).await;
    let first = seed_student(&storage, "pupil07", Some(class_id)).await;
    let second = seed_student(&storage, "pupil08", Some(class_id)).await;
    storage.enroll_student(&first, &subject, 8).await.unwrap();
    storage.enroll_student(&second, &subject, 8).await.unwrap();

    let day = date(2025, 3, 3);
    let marked = storage
        .mark_attendance(
            subject.id,
            day,
            vec![
                AttendanceEntry {
                    student_id: first.id,
                    status: AttendanceStatus::Present,
                    remarks: None,
                },
                AttendanceEntry {
                    student_id: second.id,
                    status: AttendanceStatus::Absent,
                    remarks: None,
                },
            ],
            None,
        )
        .await
        .unwrap();
    assert_eq!((marked.created, marked.updated), (2, 0));

    let remarked = storage
        .mark_attendance(
            subject.id,
            day,
            vec![AttendanceEntry {
                student_id: second.id,
                status: AttendanceStatus::Late,
                remarks: Some("bus delay".to_string()),
            }],
            None,
        )
        .await
        .unwrap();
    assert_eq!((remarked.created, remarked.updated), (0, 1));
    assert_eq!(remarked.records[0].status, AttendanceStatus::Late);

    let all = AttendanceRecords::find().all(&storage.db).await.unwrap();
    assert_eq!(all.len(), 2);

    assert_eq!(
        storage.count_subject_attendance_on(subject.id, day).await.unwrap(),
        (2, 2)
    );

    storage
        .mark_attendance(
            subject.id,
            date(2025, 3, 4),
            vec![AttendanceEntry {
                student_id: second.id,
                status: AttendanceStatus::Absent,
                remarks: None,
            }],
            None,
        )
        .await
        .unwrap();

    let report = storage
        .subject_attendance_report(subject.id, Some(day), None)
        .await
        .unwrap();
    let row = report
        .rows
        .iter()
        .find(|r| r.student_id == second.id)
        .unwrap();
    assert_eq!(row.summary.total_classes, 2);
    assert_eq!(row.summary.present_classes, 1);
    assert_eq!(row.summary.attendance_percentage, 50.0);

    let history = storage
        .list_student_attendance(second.id, Some(date(2025, 3, 4)))
        .await
        .unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].date, date(2025, 3, 4));
}

#[tokio::test]
async fn test_grade_percentage_and_letter_derivation() {
    let storage = SeaOrmStorage::in_memory().await.unwrap();
    let class_id = seed_class(&storage, "Grade 6A", 30).await;
    let subject = seed_subject(&storage, "SCI6", class_id, true, true).await;
    let student = seed_student(&storage, "pupil09", Some(class_id)).await;
    storage.enroll_student(&student, &subject, 8).await.unwrap();

    let grade = storage
        .create_grade(
            CreateGradeRequest {
                student_id: student.id,
                subject_id: subject.id,
                grade_type: GradeType::Quiz,
                title: "Quiz 1".to_string(),
                marks_obtained: 45.0,
                total_marks: 50.0,
                date_assigned: date(2025, 2, 10),
                date_submitted: None,
                comments: None,
                is_published: false,
            },
            None,
        )
        .await
        .unwrap();
    assert_eq!(grade.percentage, Some(90.0));
    assert_eq!(grade.letter_grade.as_deref(), Some("A-"));

    assert!(
        storage
            .find_grade(student.id, subject.id, "Quiz 1", GradeType::Quiz)
            .await
            .unwrap()
            .is_some()
    );
    assert!(
        storage
            .find_grade(student.id, subject.id, "Quiz 1", GradeType::Test)
            .await
            .unwrap()
            .is_none()
    );

    let updated = storage
        .update_grade(
            grade.id,
            UpdateGradeRequest {
                marks_obtained: Some(29.0),
                is_published: Some(true),
                ..Default::default()
            },
            None,
        )
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.percentage, Some(58.0));
    assert_eq!(updated.letter_grade.as_deref(), Some("F"));
    assert!(updated.is_published);

    let published = storage
        .list_student_published_grades(student.id, None)
        .await
        .unwrap();
    assert_eq!(published.len(), 1);

    let list = storage
        .list_grades_with_pagination(GradeListQuery {
            subject_id: Some(subject.id),
            is_published: Some(false),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(list.pagination.total, 0);

    assert_eq!(storage.count_subject_grades(subject.id).await.unwrap(), (1, 1));

    let report = storage.subject_grade_report(subject.id).await.unwrap();
    assert_eq!(report.rows[0].average_percentage, Some(58.0));
    assert_eq!(report.rows[0].letter_grade.as_deref(), Some("F"));
}

fn quiz(student_id: i64, subject_id: i64, grade_type: GradeType) -> CreateGradeRequest {
    CreateGradeRequest {
        student_id,
        subject_id,
        grade_type,
        title: "Unit Quiz".to_string(),
        marks_obtained: 18.0,
        total_marks: 20.0,
        date_assigned: date(2025, 3, 3),
        date_submitted: None,
        comments: None,
        is_published: false,
    }
}

#[tokio::test]
async fn test_grade_unique_per_student_subject_title_and_type() {
    let storage = SeaOrmStorage::in_memory().await.unwrap();
    let class_id = seed_class(&storage, "Grade 6B", 30).await;
    let subject = seed_subject(&storage, "HIS6", class_id, true, true).await;
    let student = seed_student(&storage, "pupil12", Some(class_id)).await;

    storage
        .create_grade(quiz(student.id, subject.id, GradeType::Quiz), None)
        .await
        .unwrap();

    let duplicate = storage
        .create_grade(quiz(student.id, subject.id, GradeType::Quiz), None)
        .await;
    assert!(matches!(duplicate, Err(SchoolError::Conflict(_))), "{duplicate:?}");

    // 同标题不同类型可以共存
    let test = storage
        .create_grade(quiz(student.id, subject.id, GradeType::Test), None)
        .await
        .unwrap();

    let renamed = storage
        .update_grade(
            test.id,
            UpdateGradeRequest {
                grade_type: Some(GradeType::Quiz),
                ..Default::default()
            },
            None,
        )
        .await;
    assert!(matches!(renamed, Err(SchoolError::Conflict(_))), "{renamed:?}");
}

#[tokio::test]
async fn test_enrollment_unique_per_student_and_subject() {
    let storage = SeaOrmStorage::in_memory().await.unwrap();
    let class_id = seed_class(&storage, "Grade 7B", 30).await;
    let subject = seed_subject(&storage, "ART7", class_id, false, true).await;
    let student = seed_student(&storage, "pupil13", Some(class_id)).await;

    storage.enroll_student(&student, &subject, 8).await.unwrap();

    let now = chrono::Utc::now().timestamp();
    let second = EnrollmentActiveModel {
        student_id: Set(student.id),
        subject_id: Set(subject.id),
        enrollment_date: Set(now),
        is_active: Set(false),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(&storage.db)
    .await;
    assert!(second.is_err());
    assert_eq!(storage.count_active_enrollments(student.id).await.unwrap(), 1);
}

#[tokio::test]
async fn test_notes_visibility() {
    let storage = SeaOrmStorage::in_memory().await.unwrap();
    let teacher = seed_user(&storage, "teacher02", UserRole::Teacher).await;
    let student = seed_student(&storage, "pupil10", None).await;

    for (title, is_private) in [("Progress", false), ("Counselling", true)] {
        storage
            .create_note(
                student.id,
                teacher.id,
                CreateNoteRequest {
                    title: title.to_string(),
                    content: "...".to_string(),
                    is_private,
                },
            )
            .await
            .unwrap();
    }

    assert_eq!(storage.list_student_notes(student.id, true).await.unwrap().len(), 2);
    let public = storage.list_student_notes(student.id, false).await.unwrap();
    assert_eq!(public.len(), 1);
    assert_eq!(public[0].title, "Progress");
}

#[tokio::test]
async fn test_schedules_ordered_by_weekday_then_time() {
    let storage = SeaOrmStorage::in_memory().await.unwrap();
    let user = seed_user(&storage, "teacher03", UserRole::Teacher).await;
    let teacher = storage
        .create_teacher_profile(CreateTeacherProfileRequest {
            user_id: user.id,
            employee_id: "EMP-003".to_string(),
            qualification: Qualification::Master,
            specialization: "Mathematics".to_string(),
            experience_years: 4,
            joining_date: date(2021, 8, 15),
            salary: Some(3200.456),
            is_active: None,
        })
        .await
        .unwrap();
    assert_eq!(teacher.salary, Some(3200.46));

    let slots = [
        (Weekday::Wednesday, "09:00", "10:00"),
        (Weekday::Monday, "13:00", "14:00"),
        (Weekday::Monday, "08:00", "09:00"),
    ];
    for (weekday, start, end) in slots {
        storage
            .create_schedule(
                teacher.id,
                CreateScheduleRequest {
                    teacher_id: None,
                    weekday,
                    start_time: parse_time(start).unwrap(),
                    end_time: parse_time(end).unwrap(),
                    subject_id: None,
                    room_number: Some("R101".to_string()),
                    is_active: None,
                },
            )
            .await
            .unwrap();
    }

    let schedules = storage.list_schedules(Some(teacher.id), None).await.unwrap();
    let order: Vec<(Weekday, String)> = schedules
        .iter()
        .map(|s| (s.weekday, s.start_time.format("%H:%M").to_string()))
        .collect();
    assert_eq!(
        order,
        vec![
            (Weekday::Monday, "08:00".to_string()),
            (Weekday::Monday, "13:00".to_string()),
            (Weekday::Wednesday, "09:00".to_string()),
        ]
    );

    let slot = storage
        .find_schedule_slot(teacher.id, Weekday::Monday, parse_time("13:00").unwrap())
        .await
        .unwrap();
    assert!(slot.is_some());
}

#[tokio::test]
async fn test_admin_dashboard_counts() {
    let storage = SeaOrmStorage::in_memory().await.unwrap();
    seed_user(&storage, "admin02", UserRole::Admin).await;
    let class_id = seed_class(&storage, "Grade 5A", 30).await;
    let subject = seed_subject(&storage, "MUS5", class_id, false, true).await;
    let student = seed_student(&storage, "pupil11", Some(class_id)).await;
    storage.enroll_student(&student, &subject, 8).await.unwrap();

    let stats = storage.get_admin_dashboard().await.unwrap();
    assert_eq!(stats.total_users, 2);
    assert_eq!(stats.total_admins, 1);
    assert_eq!(stats.total_students, 1);
    assert_eq!(stats.total_teachers, 0);
    assert_eq!(stats.total_classes, 1);
    assert_eq!(stats.total_subjects, 1);
    assert_eq!(stats.active_enrollments, 1);
}
