use anyhow::Result;
use course_table::adapters::console::ConsoleSink;
use course_table::{run, TomlConfig};
use httpmock::prelude::*;
use tempfile::TempDir;

fn config_for(endpoint: &str, output_path: &str, formats: &str, view: &str) -> Result<TomlConfig> {
    let normalized_path = output_path.replace('\\', "/");
    let content = format!(
        r#"
[page]
name = "BSIT Curriculum"

[source]
endpoint = "{}"

[view]
{}

[output]
path = "{}"
formats = [{}]
"#,
        endpoint, view, normalized_path, formats
    );
    Ok(TomlConfig::from_toml_str(&content)?)
}

fn mock_courses(server: &MockServer) -> httpmock::Mock<'_> {
    server.mock(|when, then| {
        when.method(GET).path("/courses.json");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({
                "courses": [
                    {"year_level": "2nd", "sem": "1st", "code": "IT211", "description": "Data Structures", "credit": "3"},
                    {"year_level": "1st", "sem": "2nd", "code": "IT102", "description": "Computer Programming 2", "credit": 3},
                    {"year_level": "1st", "sem": "1st", "code": "IT101", "description": "Intro to Computing", "credit": "3"},
                    {"year_level": "2nd", "sem": "2nd", "code": "IT222", "description": "<Database> Systems", "credit": "2.5"}
                ]
            }));
    })
}

#[tokio::test]
async fn test_end_to_end_writes_all_formats() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let output_path = temp_dir.path().to_str().unwrap().to_string();

    let server = MockServer::start();
    let api_mock = mock_courses(&server);

    let config = config_for(
        &server.url("/courses.json"),
        &output_path,
        r#""html", "csv", "json""#,
        "",
    )?;

    let report = run(
        &config,
        "BSIT Curriculum",
        ConsoleSink::new(Vec::new()),
        None::<&[u8]>,
    )
    .await?;

    api_mock.assert();
    assert!(report.is_success());
    assert_eq!(report.written.len(), 3);

    let html = std::fs::read_to_string(temp_dir.path().join("courses.html"))?;
    assert!(html.contains("<title>BSIT Curriculum</title>"));
    assert!(html.contains("&lt;Database&gt; Systems"));
    assert!(html.contains("total credits: <strong>11.5</strong>"));
    let first_year = html.find("<td colspan=\"4\">1st</td>").unwrap();
    let second_year = html.find("<td colspan=\"4\">2nd</td>").unwrap();
    assert!(first_year < second_year);

    let csv = std::fs::read_to_string(temp_dir.path().join("courses.csv"))?;
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 5);
    assert_eq!(lines[1], "1st / 1st,IT101,Intro to Computing,3");
    assert_eq!(lines[4], "2nd / 2nd,IT222,<Database> Systems,2.5");

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(temp_dir.path().join("courses.json"))?)?;
    assert_eq!(json["summary"]["totalCourses"], 4);
    assert_eq!(json["summary"]["byYear"][0]["yearLevel"], "1st");
    assert_eq!(json["summary"]["byYear"][1]["credits"], 5.5);

    Ok(())
}

#[tokio::test]
async fn test_initial_criteria_from_config() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let output_path = temp_dir.path().to_str().unwrap().to_string();

    let server = MockServer::start();
    mock_courses(&server);

    let config = config_for(
        &server.url("/courses.json"),
        &output_path,
        r#""csv""#,
        "year = \"2nd\"\nsearch = \"data\"",
    )?;

    let report = run(&config, "Subjects", ConsoleSink::new(Vec::new()), None::<&[u8]>).await?;

    assert!(report.is_success());
    let csv = std::fs::read_to_string(temp_dir.path().join("courses.csv"))?;
    let lines: Vec<&str> = csv.lines().collect();
    // "Data Structures" and "<Database> Systems" are both 2nd year
    assert_eq!(lines.len(), 3);
    assert!(lines[1].contains("IT211"));
    assert!(lines[2].contains("IT222"));

    Ok(())
}

#[tokio::test]
async fn test_interactive_events_rewrite_outputs() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let output_path = temp_dir.path().to_str().unwrap().to_string();

    let server = MockServer::start();
    mock_courses(&server);

    let config = config_for(&server.url("/courses.json"), &output_path, r#""csv""#, "")?;
    let input: &[u8] = b"data\n:year 1st\n:clear\n:quit\nignored after quit\n";

    let report = run(&config, "Subjects", ConsoleSink::new(Vec::new()), Some(input)).await?;

    assert!(report.is_success());

    // last state: year 1st, empty search
    let csv = std::fs::read_to_string(temp_dir.path().join("courses.csv"))?;
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[1].contains("IT101"));
    assert!(lines[2].contains("IT102"));

    Ok(())
}

#[tokio::test]
async fn test_fetch_failure_writes_error_page() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let output_path = temp_dir.path().to_str().unwrap().to_string();

    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(GET).path("/courses.json");
        then.status(404);
    });

    let config = config_for(
        &server.url("/courses.json"),
        &output_path,
        r#""html", "csv""#,
        "",
    )?;

    let report = run(&config, "Subjects", ConsoleSink::new(Vec::new()), None::<&[u8]>).await?;

    api_mock.assert();
    assert!(!report.is_success());
    assert!(report
        .load_error
        .as_ref()
        .is_some_and(|e| e.is_fetch_failure()));

    let html = std::fs::read_to_string(temp_dir.path().join("courses.html"))?;
    assert!(html.contains("Failed to load subjects"));
    assert!(html.contains("404"));
    assert!(!html.contains("<table>"));

    let csv = std::fs::read_to_string(temp_dir.path().join("courses.csv"))?;
    assert_eq!(csv.lines().count(), 1);

    Ok(())
}
