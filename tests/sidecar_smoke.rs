use serde_json::json;
use std::io::{BufRead, BufReader, Write};
use std::path::PathBuf;
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};
use std::time::{SystemTime, UNIX_EPOCH};

fn temp_dir(prefix: &str) -> PathBuf {
    let p = std::env::temp_dir().join(format!(
        "{}-{}",
        prefix,
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock")
            .as_nanos()
    ));
    std::fs::create_dir_all(&p).expect("create temp dir");
    p
}

fn spawn_sidecar(data_dir: &PathBuf) -> (Child, ChildStdin, BufReader<ChildStdout>) {
    let exe = env!("CARGO_BIN_EXE_schooldeskd");
    let mut child = Command::new(exe)
        .arg(data_dir)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .expect("spawn schooldeskd");
    let stdin = child.stdin.take().expect("child stdin");
    let stdout = child.stdout.take().expect("child stdout");
    (child, stdin, BufReader::new(stdout))
}

fn request(
    stdin: &mut ChildStdin,
    reader: &mut BufReader<ChildStdout>,
    id: &str,
    method: &str,
    params: serde_json::Value,
) -> serde_json::Value {
    let payload = json!({
        "id": id,
        "method": method,
        "params": params,
    });
    writeln!(stdin, "{}", payload).expect("write request");
    stdin.flush().expect("flush request");

    let mut line = String::new();
    reader.read_line(&mut line).expect("read response line");
    assert!(!line.trim().is_empty(), "empty response for {}", method);
    let value: serde_json::Value = serde_json::from_str(line.trim()).expect("parse response json");
    assert_eq!(value.get("id").and_then(|v| v.as_str()), Some(id));
    value
}

#[test]
fn daemon_round_trips_every_method_family() {
    let data_dir = temp_dir("schooldesk-smoke");
    let (mut child, mut stdin, mut reader) = spawn_sidecar(&data_dir);

    let health = request(&mut stdin, &mut reader, "1", "health", json!({}));
    assert_eq!(health.pointer("/result/status").and_then(|v| v.as_str()), Some("OK"));

    let created_class = request(
        &mut stdin,
        &mut reader,
        "2",
        "classes.create",
        json!({ "className": "5A", "gradeLevel": 5 }),
    );
    assert_eq!(created_class.get("ok").and_then(|v| v.as_bool()), Some(true));
    let class_id = created_class
        .pointer("/result/id")
        .and_then(|v| v.as_i64())
        .expect("class id");

    let classes = request(&mut stdin, &mut reader, "3", "classes.list", json!({}));
    let listed = classes.pointer("/result").and_then(|v| v.as_array()).expect("array");
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].get("studentCount").and_then(|v| v.as_i64()), Some(0));

    let created_student = request(
        &mut stdin,
        &mut reader,
        "4",
        "students.create",
        json!({ "name": "Ann", "grade": "5", "classId": class_id }),
    );
    assert_eq!(
        created_student.pointer("/result/paymentStatus").and_then(|v| v.as_str()),
        Some("Unpaid")
    );
    let student_id = created_student
        .pointer("/result/id")
        .and_then(|v| v.as_i64())
        .expect("student id");

    let detail = request(
        &mut stdin,
        &mut reader,
        "5",
        "classes.get",
        json!({ "id": class_id }),
    );
    assert_eq!(detail.pointer("/result/studentCount").and_then(|v| v.as_i64()), Some(1));
    assert_eq!(
        detail
            .pointer("/result/students")
            .and_then(|v| v.as_array())
            .map(|a| a.len()),
        Some(1)
    );

    let updated = request(
        &mut stdin,
        &mut reader,
        "6",
        "students.update",
        json!({ "id": student_id, "name": "Ann Lee", "grade": "5", "paymentStatus": "Paid" }),
    );
    assert_eq!(updated.pointer("/result/name").and_then(|v| v.as_str()), Some("Ann Lee"));

    let stats = request(&mut stdin, &mut reader, "7", "dashboard.stats", json!({}));
    assert_eq!(stats.pointer("/result/totalStudents").and_then(|v| v.as_i64()), Some(1));
    assert_eq!(stats.pointer("/result/paidStudents").and_then(|v| v.as_i64()), Some(1));

    let missing = request(
        &mut stdin,
        &mut reader,
        "8",
        "students.get",
        json!({ "id": 9999 }),
    );
    assert_eq!(missing.get("ok").and_then(|v| v.as_bool()), Some(false));
    assert_eq!(
        missing.pointer("/error/code").and_then(|v| v.as_str()),
        Some("not_found")
    );

    let invalid = request(
        &mut stdin,
        &mut reader,
        "9",
        "students.create",
        json!({ "name": "NoGrade" }),
    );
    assert_eq!(
        invalid.pointer("/error/code").and_then(|v| v.as_str()),
        Some("validation")
    );

    let deleted_class = request(
        &mut stdin,
        &mut reader,
        "10",
        "classes.delete",
        json!({ "id": class_id }),
    );
    assert_eq!(
        deleted_class.pointer("/result/message").and_then(|v| v.as_str()),
        Some("Class deleted successfully and students unassigned")
    );

    // The student survived the class deletion with a null reference.
    let survivor = request(
        &mut stdin,
        &mut reader,
        "11",
        "students.get",
        json!({ "id": student_id }),
    );
    assert_eq!(survivor.pointer("/result/classId"), Some(&serde_json::Value::Null));

    let unknown = request(&mut stdin, &mut reader, "12", "nonsense.method", json!({}));
    assert_eq!(
        unknown.pointer("/error/code").and_then(|v| v.as_str()),
        Some("not_implemented")
    );

    drop(stdin);
    let _ = child.wait();
    let _ = std::fs::remove_dir_all(data_dir);
}
