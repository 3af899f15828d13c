use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const MEETING: &str = "BEGIN:VCALENDAR\r\n\
VERSION:2.0\r\n\
PRODID:TEST\r\n\
BEGIN:VEVENT\r\n\
UID:1\r\n\
SUMMARY:Reunião\\, Projeto\r\n\
DTSTART:20240105T140000\r\n\
DTEND:20240105T150000\r\n\
LOCATION:Sala 2\r\n\
END:VEVENT\r\n\
END:VCALENDAR\r\n";

/// Command isolated from the user's real config directory.
fn ics2csv(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("ics2csv").unwrap();
    cmd.env("HOME", home.path())
        .env("XDG_CONFIG_HOME", home.path().join(".config"))
        .env_remove("ICS2CSV_VARIANT")
        .env_remove("ICS2CSV_TIMEZONE")
        .env_remove("ICS2CSV_BOM");
    cmd
}

#[test]
fn converts_next_to_input_with_bom() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("agenda.ics");
    std::fs::write(&input, MEETING).unwrap();

    ics2csv(&dir)
        .arg("convert")
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("agenda.csv"));

    let bytes = std::fs::read(dir.path().join("agenda.csv")).unwrap();
    assert_eq!(&bytes[..3], b"\xEF\xBB\xBF");
    let csv = String::from_utf8(bytes[3..].to_vec()).unwrap();
    assert_eq!(
        csv.lines().nth(1),
        Some("\"Reunião, Projeto\",05/01/2024,14:00:00,05/01/2024,15:00:00,Não,,Sala 2")
    );
}

#[test]
fn extended_variant_to_stdout() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("agenda.ics");
    std::fs::write(&input, MEETING).unwrap();

    ics2csv(&dir)
        .args(["convert", "--variant", "extended", "--stdout"])
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Coluna 1;Coluna 2;"))
        .stdout(predicate::str::contains("\"Reunião, Projeto\";\"\""));
}

#[test]
fn explicit_output_without_bom() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("agenda.ics");
    let output = dir.path().join("saida.csv");
    std::fs::write(&input, MEETING).unwrap();

    ics2csv(&dir)
        .arg("convert")
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .arg("--no-bom")
        .assert()
        .success();

    let csv = std::fs::read_to_string(&output).unwrap();
    assert!(csv.starts_with("Assunto,"));
}

#[test]
fn empty_file_fails_without_output() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("vazio.ics");
    std::fs::write(&input, "").unwrap();

    ics2csv(&dir)
        .arg("convert")
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Nenhum arquivo enviado."));

    assert!(!dir.path().join("vazio.csv").exists());
}

#[test]
fn calendar_without_events_fails() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("tarefas.ics");
    std::fs::write(
        &input,
        "BEGIN:VCALENDAR\r\nVERSION:2.0\r\nPRODID:TEST\r\nBEGIN:VTODO\r\nUID:t\r\nEND:VTODO\r\nEND:VCALENDAR\r\n",
    )
    .unwrap();

    ics2csv(&dir)
        .arg("convert")
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Nenhum evento válido"));
}

#[test]
fn config_shows_effective_settings() {
    let dir = TempDir::new().unwrap();

    ics2csv(&dir)
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("timezone = \"America/Sao_Paulo\""));
}
