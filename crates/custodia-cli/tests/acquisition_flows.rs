use std::path::{Path, PathBuf};
use std::process::Command;

fn custodia_cmd() -> Command {
    Command::new(env!("CARGO_BIN_EXE_custodia"))
}

struct TestDir {
    path: PathBuf,
}

impl TestDir {
    fn new(label: &str) -> Self {
        let mut path = std::env::temp_dir();
        path.push(format!(
            "custodia_flow_test_{}_{}",
            std::process::id(),
            label
        ));
        let _ = std::fs::remove_dir_all(&path);
        std::fs::create_dir_all(&path).expect("create temp dir");
        Self { path }
    }

    fn join(&self, rel: &str) -> PathBuf {
        self.path.join(rel)
    }
}

impl Drop for TestDir {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.path);
    }
}

fn write_record(dir: &TestDir, order: &str, files: &[&Path]) -> PathBuf {
    let list = files
        .iter()
        .map(|p| format!("{:?}", p.display().to_string()))
        .collect::<Vec<String>>()
        .join(", ");
    let body = format!(
        r#"{{
            "custodian": {{
                "name": "Robson Laurindo",
                "rank": "Cap PM",
                "id": "529.982.247-25",
                "function": "Autoridade de PJM",
                "authority": "2º BPM",
                "order_number": "{order}",
                "region": "Rio Grande do Sul"
            }},
            "owner": {{
                "name": "Fulano de Tal",
                "kind": "Pessoa Física",
                "id": "529.982.247-25"
            }},
            "files": [{list}]
        }}"#
    );
    let path = dir.join("record.json");
    std::fs::write(&path, body).expect("write record");
    path
}

fn find_with_prefix(dir: &Path, prefix: &str) -> Vec<PathBuf> {
    let mut found = Vec::new();
    for entry in std::fs::read_dir(dir).expect("read certificates dir") {
        let entry = entry.expect("dir entry");
        let name = entry.file_name().to_string_lossy().into_owned();
        if name.starts_with(prefix) {
            found.push(entry.path());
        }
    }
    found
}

#[test]
fn full_run_produces_bundle_certificate_and_minute() {
    let dir = TestDir::new("full_run");
    let a = dir.join("laudo.txt");
    std::fs::write(&a, b"abc").expect("write evidence");
    let b = dir.join("vazio.bin");
    std::fs::write(&b, b"").expect("write evidence");

    let record = write_record(&dir, "15/2024", &[&a, &b]);
    let output = dir.join("out");

    let out = custodia_cmd()
        .args(["run", "--record"])
        .arg(&record)
        .arg("--output")
        .arg(&output)
        .output()
        .expect("run custodia run");
    assert_eq!(
        out.status.code(),
        Some(0),
        "stderr: {}",
        String::from_utf8_lossy(&out.stderr)
    );

    let base = output.join("Evidence_Acquired_Order_15_2024");
    assert!(base.is_dir());
    assert_eq!(
        std::fs::read(base.join("Files").join("laudo.txt")).expect("copied file"),
        b"abc"
    );
    assert!(base.join("Files").join("vazio.bin").is_file());

    let certificates = base.join("Certificates");
    let pdfs = find_with_prefix(&certificates, "Certidao_");
    assert_eq!(pdfs.len(), 1);
    let pdf = std::fs::read(&pdfs[0]).expect("read certificate");
    assert!(pdf.starts_with(b"%PDF"));

    let minutes = find_with_prefix(&certificates, "Minuta_de_Juntada_");
    assert_eq!(minutes.len(), 1);
    let minute = std::fs::read_to_string(&minutes[0]).expect("read minute");
    assert!(minute.starts_with("MINUTA DE JUNTADA\n"));
    assert!(minute.contains("1. laudo.txt"));
    assert!(minute.contains("2. vazio.bin"));

    // The worker reports phase boundaries and hashing progress.
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("\"status\":\"hashing\""));
    assert!(stderr.contains("\"status\":\"rendering\""));
    assert!(stderr.contains("\"status\":\"done\""));

    // Stdout names both artifacts for scripted callers.
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("Certidao_"));
    assert!(stdout.contains("Minuta_de_Juntada_"));
}

#[test]
fn rerun_with_same_order_reuses_the_bundle() {
    let dir = TestDir::new("rerun");
    let a = dir.join("evidencia.bin");
    std::fs::write(&a, b"conteudo").expect("write evidence");
    let record = write_record(&dir, "77-2025", &[&a]);
    let output = dir.join("out");

    for _ in 0..2 {
        let out = custodia_cmd()
            .args(["run", "--record"])
            .arg(&record)
            .arg("--output")
            .arg(&output)
            .output()
            .expect("run custodia run");
        assert_eq!(
            out.status.code(),
            Some(0),
            "stderr: {}",
            String::from_utf8_lossy(&out.stderr)
        );
    }

    let base = output.join("Evidence_Acquired_Order_77-2025");
    assert!(base.join("Files").join("evidencia.bin").is_file());
}

#[test]
fn missing_source_file_aborts_and_keeps_prior_copies() {
    let dir = TestDir::new("missing_source");
    let good = dir.join("presente.bin");
    std::fs::write(&good, b"ok").expect("write evidence");
    let missing = dir.join("ausente.bin");

    let record = write_record(&dir, "9", &[&good, &missing]);
    let output = dir.join("out");

    let out = custodia_cmd()
        .args(["run", "--record"])
        .arg(&record)
        .arg("--output")
        .arg(&output)
        .output()
        .expect("run custodia run");
    assert_eq!(out.status.code(), Some(1));

    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("EVIDENCE_COPY_FAILED"));
    assert!(stderr.contains("ausente.bin"));

    // The copy made before the failure is left for inspection, and no
    // certificate was produced.
    let base = output.join("Evidence_Acquired_Order_9");
    assert!(base.join("Files").join("presente.bin").is_file());
    assert!(find_with_prefix(&base.join("Certificates"), "Certidao_").is_empty());
}
