use std::fs;
use std::io::{BufWriter, Cursor};
use std::path::Path;

use asrtools::*;
use tempfile::TempDir;

const NODE_REPORT: &str = "\
Ancestral node 12 reconstruction
alignlen: 5
posterior probabilities, three best candidates per site
SITE:      1M L I 0.998  0.001  0.001
SITE:      2K R Q 0.812  0.120  0.040
SITE:      3T S A 0.640  0.300  0.050
SITE:      4A G S 0.510  0.420  0.050
SITE:      5E D Q 0.950  0.030  0.020

>node_12
MKSGE
>node_12_smp_gaps
-----
>sigs
*****
>node_12_alt
MRTAQ
";

/// Run the defattr pipeline on `report` into `dir/name`, answering the
/// selection prompt with `answer`.
fn export(dir: &Path, name: &str, report: &str, answer: &str) -> String {
    let input = dir.join("node.txt");
    fs::write(&input, report).unwrap();
    let text = fs::read_to_string(&input).unwrap();

    let out_path = dir.join(name);
    let mut console: Vec<u8> = Vec::new();
    let mut prompter = Prompter::new(Cursor::new(format!("{}\n", answer)), &mut console);
    let file = create_output(&out_path, false, &mut prompter).unwrap().unwrap();

    let report = parse_report(&text);
    let choices = report.selectable_sequences();
    let idx = prompter.select_sequence(&choices).unwrap();
    let records = map_posteriors(choices[idx], &report.sites);
    write_defattr(BufWriter::new(file), &records).unwrap();
    fs::read_to_string(out_path).unwrap()
}

#[test]
fn single_site_end_to_end() {
    let dir = TempDir::new().unwrap();
    let out = export(dir.path(), "one.defattr", "alignlen: 1\nSITE:      1A C G 0.950  0.030  0.020\n>anc\nA\n", "1");
    assert_eq!(out, "attribute: posteriors\nrecipient: residues\n\t:1\t0.950\n");
}

#[test]
fn node_report_maps_each_residue() {
    let dir = TempDir::new().unwrap();
    let out = export(dir.path(), "node_12.defattr", NODE_REPORT, "node_12");
    let expected = "attribute: posteriors\nrecipient: residues\n\
                    \t:1\t0.998\n\t:2\t0.812\n\t:3\t0.300\n\t:4\t0.420\n\t:5\t0.950\n";
    assert_eq!(out, expected);

    let alt = export(dir.path(), "alt.defattr", NODE_REPORT, "2");
    assert!(alt.ends_with("\t:1\t0.998\n\t:2\t0.120\n\t:3\t0.640\n\t:4\t0.510\n\t:5\t0.020\n"));
}

#[test]
fn index_and_name_selection_write_identical_files() {
    let dir = TempDir::new().unwrap();
    let by_index = export(dir.path(), "by_index.defattr", NODE_REPORT, "2");
    let by_name = export(dir.path(), "by_name.defattr", NODE_REPORT, "node_12_alt");
    assert_eq!(by_index, by_name);
}

#[test]
fn report_summary() {
    let report = parse_report(NODE_REPORT);
    assert_eq!(report.alignment_length, AlignmentLength::Declared { length: 5, line: 2 });
    assert_eq!(report.sites.len(), 5);
    assert_eq!(report.sequences.len(), 4);
    let names: Vec<&str> = report.selectable_sequences().iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, ["node_12", "node_12_alt"]);
}

#[test]
fn sites_export_numbers_by_site() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("sites.defattr");
    let report = parse_report(NODE_REPORT);
    let mut console: Vec<u8> = Vec::new();
    let file = create_output(&path, false, &mut Prompter::new(Cursor::new(""), &mut console)).unwrap().unwrap();
    write_defattr(file, &site_records(&report.sites)).unwrap();
    let out = fs::read_to_string(&path).unwrap();
    assert_eq!(out.lines().count(), 7);
    assert!(out.contains("\t:3\t0.640\n"));
    // no prompt for a fresh file
    assert!(console.is_empty());
}

#[test]
fn existing_output_is_kept_on_refusal() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("keep.defattr");
    fs::write(&path, "old").unwrap();
    let mut console: Vec<u8> = Vec::new();
    let res = create_output(&path, false, &mut Prompter::new(Cursor::new("y\nn\n"), &mut console)).unwrap();
    assert!(res.is_none());
    assert_eq!(fs::read_to_string(&path).unwrap(), "old");
    assert!(String::from_utf8(console).unwrap().contains("Type Y (not y)"));
}

#[test]
fn existing_output_is_replaced_when_confirmed_or_forced() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("replace.defattr");

    fs::write(&path, "old").unwrap();
    let mut console: Vec<u8> = Vec::new();
    let file = create_output(&path, false, &mut Prompter::new(Cursor::new("Y\n"), &mut console)).unwrap();
    assert!(file.is_some());
    drop(file);
    assert_eq!(fs::read_to_string(&path).unwrap(), "");

    fs::write(&path, "old").unwrap();
    let mut console: Vec<u8> = Vec::new();
    let file = create_output(&path, true, &mut Prompter::new(Cursor::new(""), &mut console)).unwrap();
    assert!(file.is_some());
    assert!(console.is_empty());
}

#[test]
fn unwritable_output_is_an_io_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("missing").join("out.defattr");
    let mut console: Vec<u8> = Vec::new();
    let res = create_output(&path, false, &mut Prompter::new(Cursor::new(""), &mut console));
    assert!(matches!(res, Err(AsrError::Io(_))));
}

#[test]
fn omitted_site_shifts_later_residues() {
    // Site 2 is missing from the table; residues are still paired by order.
    let text = "\
SITE:      1M L I 0.998  0.001  0.001
SITE:      3T S A 0.640  0.300  0.050
>anc
MT
";
    let report = parse_report(text);
    let out = map_posteriors(report.selectable_sequences()[0], &report.sites);
    let probs: Vec<&str> = out.iter().map(|r| r.probability.as_str()).collect();
    assert_eq!(probs, ["0.998", "0.640"]);
}

#[test]
fn preset_sequence_exports_without_prompt() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("preset.defattr");
    let report = parse_report(NODE_REPORT);
    let mut console: Vec<u8> = Vec::new();
    let outcome =
        export_defattr(&report, &path, Some("node_12_alt"), false, &mut Prompter::new(Cursor::new(""), &mut console))
            .unwrap();
    assert_eq!(outcome, Export::Written { target: "node_12_alt".into(), records: 5 });
    assert!(console.is_empty());
    let by_name = fs::read_to_string(&path).unwrap();
    assert_eq!(by_name, export(dir.path(), "prompted.defattr", NODE_REPORT, "2"));
}

#[test]
fn bad_preset_sequence_leaves_existing_output_alone() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("keep.defattr");
    fs::write(&path, "old").unwrap();
    let report = parse_report(NODE_REPORT);
    let mut console: Vec<u8> = Vec::new();
    let res = export_defattr(&report, &path, Some("bogus"), true, &mut Prompter::new(Cursor::new(""), &mut console));
    assert!(matches!(res, Err(AsrError::SequenceNotFound(_))));
    assert_eq!(fs::read_to_string(&path).unwrap(), "old");
}

#[test]
fn report_without_targets_leaves_existing_output_alone() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("keep.defattr");
    fs::write(&path, "old").unwrap();
    let report = parse_report("SITE:      1A C G 0.950  0.030  0.020\n>sigs\n*\n");
    let mut console: Vec<u8> = Vec::new();
    let res = export_defattr(&report, &path, None, true, &mut Prompter::new(Cursor::new("1\n"), &mut console));
    assert!(matches!(res, Err(AsrError::NoSelectableSequences)));
    assert_eq!(fs::read_to_string(&path).unwrap(), "old");
}

#[test]
fn declined_overwrite_is_not_an_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("keep.defattr");
    fs::write(&path, "old").unwrap();
    let report = parse_report(NODE_REPORT);
    let mut console: Vec<u8> = Vec::new();
    let outcome = export_defattr(&report, &path, None, false, &mut Prompter::new(Cursor::new("n\n"), &mut console)).unwrap();
    assert_eq!(outcome, Export::Declined);
    assert_eq!(fs::read_to_string(&path).unwrap(), "old");

    let outcome = export_sites(&report, &path, false, &mut Prompter::new(Cursor::new("no\n"), &mut console)).unwrap();
    assert_eq!(outcome, Export::Declined);
    assert_eq!(fs::read_to_string(&path).unwrap(), "old");
}

#[test]
fn interactive_export_confirms_then_selects() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("node.defattr");
    fs::write(&path, "old").unwrap();
    let report = parse_report(NODE_REPORT);
    let mut console: Vec<u8> = Vec::new();
    let outcome =
        export_defattr(&report, &path, None, false, &mut Prompter::new(Cursor::new("Y\nnode_12\n"), &mut console))
            .unwrap();
    assert_eq!(outcome, Export::Written { target: "node_12".into(), records: 5 });
    assert!(fs::read_to_string(&path).unwrap().ends_with("\t:5\t0.950\n"));
}
