use schooldeskd::api::AppState;
use schooldeskd::client::{ApiClient, InProcess};
use schooldeskd::db;
use schooldeskd::model::PaymentStatus;
use schooldeskd::view::pages::{ClassesPage, DashboardPage, StudentsPage};

fn client() -> ApiClient<InProcess> {
    let conn = db::open_in_memory().expect("open store");
    ApiClient::in_process(AppState::new(conn))
}

fn add_student(page: &mut StudentsPage, api: &mut ApiClient<InProcess>, name: &str, grade: &str) {
    page.open_add();
    page.form.draft.name = name.to_string();
    page.form.draft.grade = grade.to_string();
    assert!(page.submit(api), "student submit should succeed");
}

fn add_class(page: &mut ClassesPage, api: &mut ApiClient<InProcess>, name: &str, grade: &str) {
    page.open_add();
    page.form.draft.class_name = name.to_string();
    page.form.draft.grade_level = grade.to_string();
    assert!(page.submit(api), "class submit should succeed");
}

#[test]
fn students_page_create_patches_the_list_without_a_refetch() {
    let mut api = client();
    let mut page = StudentsPage::new();
    page.load(&mut api);
    assert_eq!(page.visible().len(), 0);

    add_student(&mut page, &mut api, "Ann", "5");
    add_student(&mut page, &mut api, "Ben", "6");

    assert!(!page.form.is_open());
    let visible = page.visible();
    assert_eq!(visible.len(), 2);
    // Newest first, same as the server ordering.
    assert_eq!(visible[0].name, "Ben");
    assert_eq!(visible[1].name, "Ann");
}

#[test]
fn students_page_edit_prefills_saves_and_refreshes() {
    let mut api = client();
    let mut page = StudentsPage::new();
    page.load(&mut api);
    add_student(&mut page, &mut api, "Ann", "5");

    let ann = page.visible()[0].clone();
    page.open_edit(&ann);
    assert_eq!(page.form.draft.name, "Ann");

    page.form.draft.grade = "6".to_string();
    page.form.draft.payment_status = PaymentStatus::Paid;
    assert!(page.submit(&mut api));

    let visible = page.visible();
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].grade, "6");
    assert_eq!(visible[0].payment_status, PaymentStatus::Paid);
}

#[test]
fn students_page_local_validation_never_reaches_the_server() {
    let mut api = client();
    let mut page = StudentsPage::new();
    page.load(&mut api);

    page.open_add();
    page.form.draft.name = "Ann".to_string();
    assert!(!page.submit(&mut api));
    assert!(page.form.is_open());
    assert_eq!(
        page.form.error.as_deref(),
        Some("Name and grade are required")
    );
    assert_eq!(api.students_list().expect("list").len(), 0);
}

#[test]
fn declining_a_delete_leaves_everything_untouched() {
    let mut api = client();
    let mut page = StudentsPage::new();
    page.load(&mut api);
    add_student(&mut page, &mut api, "Ann", "5");
    let id = page.visible()[0].id;

    page.request_delete(id);
    assert_eq!(
        page.confirm.pending().map(|p| p.prompt),
        Some("Are you sure you want to delete this student?")
    );
    page.decline_delete();
    assert!(page.confirm.pending().is_none());

    // No call went out: the row is still there on the server and locally.
    assert_eq!(page.visible().len(), 1);
    assert_eq!(api.students_list().expect("list").len(), 1);

    // Confirming with nothing pending is a no-op too.
    page.confirm_delete(&mut api).expect("nothing pending");
    assert_eq!(page.visible().len(), 1);
}

#[test]
fn confirmed_delete_removes_the_row() {
    let mut api = client();
    let mut page = StudentsPage::new();
    page.load(&mut api);
    add_student(&mut page, &mut api, "Ann", "5");
    let id = page.visible()[0].id;

    page.request_delete(id);
    page.confirm_delete(&mut api).expect("delete");

    assert_eq!(page.visible().len(), 0);
    assert_eq!(api.students_list().expect("list").len(), 0);
}

#[test]
fn classes_page_refetches_so_student_counts_stay_live() {
    let mut api = client();
    let mut classes = ClassesPage::new();
    classes.load(&mut api);
    add_class(&mut classes, &mut api, "5A", "5");

    let class_id = classes.visible()[0].id;
    assert_eq!(classes.visible()[0].student_count, 0);

    // A student joins the class behind the page's back; the page sees the
    // new count after its refetch.
    let mut students = StudentsPage::new();
    students.load(&mut api);
    students.open_add();
    students.form.draft.name = "Ann".to_string();
    students.form.draft.grade = "5".to_string();
    students.form.draft.class_id = class_id.to_string();
    assert!(students.submit(&mut api));

    classes.load(&mut api);
    assert_eq!(classes.visible()[0].student_count, 1);

    classes.open_detail(&mut api, class_id);
    let detail = classes.detail.value().expect("detail");
    assert_eq!(detail.students.len(), 1);
    assert_eq!(detail.students[0].name, "Ann");
}

#[test]
fn classes_page_server_rejection_keeps_the_modal_open() {
    let mut api = client();
    let mut page = ClassesPage::new();
    page.load(&mut api);

    // Passes the client-side parse but fails the server's range check.
    page.open_add();
    page.form.draft.class_name = "5A".to_string();
    page.form.draft.grade_level = "42".to_string();
    assert!(!page.submit(&mut api));

    assert!(page.form.is_open());
    assert_eq!(page.form.draft.class_name, "5A");
    assert_eq!(page.form.draft.grade_level, "42");
    assert_eq!(
        page.form.error.as_deref(),
        Some("Failed to save: Grade level must be between 0 and 12")
    );
    assert!(api.classes_list().expect("list").is_empty());
}

#[test]
fn class_delete_prompt_warns_about_unassignment() {
    let mut api = client();
    let mut page = ClassesPage::new();
    page.load(&mut api);
    add_class(&mut page, &mut api, "5A", "5");
    let id = page.visible()[0].id;

    page.request_delete(id);
    assert_eq!(
        page.confirm.pending().map(|p| p.prompt),
        Some("Are you sure you want to delete this class? Students will be unassigned.")
    );
    page.confirm_delete(&mut api).expect("delete");
    assert!(page.visible().is_empty());
}

#[test]
fn classes_group_by_grade_with_kindergarten_labelled() {
    let mut api = client();
    let mut page = ClassesPage::new();
    page.load(&mut api);
    add_class(&mut page, &mut api, "K1", "0");
    add_class(&mut page, &mut api, "5A", "5");
    add_class(&mut page, &mut api, "5B", "5");

    let grouped = page.grouped();
    assert_eq!(grouped.len(), 2);
    assert_eq!(grouped[&0].len(), 1);
    assert_eq!(grouped[&5].len(), 2);

    assert_eq!(ClassesPage::grade_title(0), "Grade K (Kindergarten)");
    assert_eq!(ClassesPage::grade_title(5), "Grade 5");
}

#[test]
fn dashboard_reflects_payment_counts() {
    let mut api = client();
    let mut students = StudentsPage::new();
    students.load(&mut api);

    for (name, status) in [
        ("Ann", PaymentStatus::Paid),
        ("Ben", PaymentStatus::Paid),
        ("Cal", PaymentStatus::Unpaid),
        ("Dee", PaymentStatus::DueToDeadline),
    ] {
        students.open_add();
        students.form.draft.name = name.to_string();
        students.form.draft.grade = "5".to_string();
        students.form.draft.payment_status = status;
        assert!(students.submit(&mut api));
    }

    let mut dashboard = DashboardPage::new();
    dashboard.load(&mut api);
    let stats = dashboard.stats.value().expect("stats");
    assert_eq!(stats.total_students, 4);
    assert_eq!(stats.paid_students, 2);
    assert_eq!(stats.unpaid_students, 1);
    assert_eq!(stats.total_teachers, 0);
    assert_eq!(stats.profit, 0);
}
