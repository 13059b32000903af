use assert_cmd::Command;
use std::fs;
use tempfile::TempDir;

#[test]
fn command_distance() -> anyhow::Result<()> {
    let mut cmd = Command::cargo_bin("pacon")?;
    let output = cmd.arg("distance").arg("tests/aln/example.fa").output()?;

    let stdout = String::from_utf8(output.stdout)?;
    let mut lines = stdout.lines();

    assert_eq!(lines.next(), Some("4"));

    // 1/19 = 0.0526, 2/19 = 0.1053
    let seq1 = lines.next().unwrap();
    assert_eq!(seq1, "Seq1\t0.0000\t0.0526\t0.0526\t0.0526");
    let seq2 = lines.next().unwrap();
    assert_eq!(seq2, "Seq2\t0.0526\t0.0000\t0.1053\t0.1053");

    // All distances within [0, 0.2); off-diagonal ones are nonzero
    for line in stdout.lines().skip(1) {
        for field in line.split('\t').skip(1) {
            let d: f64 = field.parse()?;
            assert!((0.0..0.2).contains(&d), "distance out of range: {}", d);
        }
    }

    Ok(())
}

#[test]
fn command_distance_gz() -> anyhow::Result<()> {
    let mut cmd = Command::cargo_bin("pacon")?;
    let output = cmd.arg("distance").arg("tests/aln/example.fa.gz").output()?;

    let stdout = String::from_utf8(output.stdout)?;
    assert_eq!(stdout.lines().count(), 5);
    assert!(stdout.contains("Seq4\t0.0526\t0.1053\t0.1053\t0.0000"));

    Ok(())
}

#[test]
fn command_distance_outfile() -> anyhow::Result<()> {
    let temp = TempDir::new()?;
    let outfile = temp.path().join("matrix.phy");

    let mut cmd = Command::cargo_bin("pacon")?;
    cmd.arg("distance")
        .arg("tests/aln/example.fa")
        .arg("-o")
        .arg(&outfile)
        .assert()
        .success();

    let content = fs::read_to_string(&outfile)?;
    assert!(content.starts_with("4\n"));

    Ok(())
}

#[test]
fn command_distance_insufficient() -> anyhow::Result<()> {
    let temp = TempDir::new()?;
    let input = temp.path().join("one.fa");
    fs::write(&input, ">only\nACGT\n")?;

    let mut cmd = Command::cargo_bin("pacon")?;
    cmd.arg("distance")
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicates::str::contains("insufficient sequences"));

    Ok(())
}

#[test]
fn command_distance_unequal() -> anyhow::Result<()> {
    let temp = TempDir::new()?;
    let input = temp.path().join("ragged.fa");
    fs::write(&input, ">a\nACGT\n>b\nACG\n")?;

    let mut cmd = Command::cargo_bin("pacon")?;
    cmd.arg("distance")
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicates::str::contains("alignment width"));

    Ok(())
}

#[test]
fn command_distance_zero_width() -> anyhow::Result<()> {
    let temp = TempDir::new()?;
    let input = temp.path().join("empty.fa");
    fs::write(&input, ">a\n\n>b\n\n")?;

    // The parser or the distance guard rejects this; either way the
    // arithmetic fault is never reached
    let mut cmd = Command::cargo_bin("pacon")?;
    cmd.arg("distance").arg(&input).assert().failure();

    Ok(())
}
