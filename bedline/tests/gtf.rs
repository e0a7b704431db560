#[macro_use]
extern crate matches;
extern crate bedline;

use bedline::{BedKind, Error, GtfConverter, GtfError, Strand};


static TWO_TRANSCRIPTS_GTF: &'static str = include_str!("data/two_transcripts.gtf");


fn convert_err(gtf: &str) -> GtfError {
    match GtfConverter::new().convert(gtf.as_bytes()) {
        Err(Error::Gtf(err)) => err,
        otherwise => panic!("unexpected result: {:?}", otherwise),
    }
}

#[test]
fn gtf_multiple_transcripts() {
    let transcripts = GtfConverter::new()
        .convert(TWO_TRANSCRIPTS_GTF.as_bytes())
        .expect("transcripts");
    assert_eq!(transcripts.len(), 2);

    let trx1 = transcripts[0].record();
    assert_eq!(trx1.kind(), BedKind::Bed12);
    assert_eq!(trx1.name(), "T1");
    assert_eq!(trx1.strand(), Strand::Forward);
    assert_eq!(trx1.to_string(),
               "chr2\t100\t500\tT1\t0\t+\t120\t403\t0\t2\t50,200,\t0,200,");
    assert!(transcripts[0].extra().is_empty());

    let trx2 = transcripts[1].record();
    assert_eq!(trx2.strand(), Strand::Reverse);
    assert!(!trx2.has_cds());
    assert_eq!(trx2.to_string(),
               "chr2\t1000\t1300\tT2\t0\t-\t1300\t1300\t0\t2\t50,100,\t0,200,");
}

#[test]
fn gtf_extra_fields() {
    let transcripts = GtfConverter::new()
        .extra_fields(vec!["gene_name", "transcript_biotype"])
        .convert(TWO_TRANSCRIPTS_GTF.as_bytes())
        .expect("transcripts");
    assert_eq!(transcripts[0].extra(), &["ABC".to_owned(), "protein_coding".to_owned()]);
    assert_eq!(transcripts[1].extra(), &["XYZ".to_owned(), "NA".to_owned()]);
}

#[test]
fn gtf_unrecognized_strand() {
    let gtf = "chr1\tsrc\ttranscript\t1\t100\t.\t.\t.\ttranscript_id \"T9\";\n";
    assert_eq!(convert_err(gtf), GtfError::UnrecognizedStrand("T9".to_owned()));
}

#[test]
fn gtf_orphan_exon() {
    let gtf = "chr1\tsrc\texon\t1\t100\t.\t+\t.\ttranscript_id \"T9\";\n\
               chr1\tsrc\ttranscript\t1\t100\t.\t+\t.\ttranscript_id \"T9\";\n";
    assert_eq!(convert_err(gtf), GtfError::MissingTranscript("T9".to_owned()));
}

#[test]
fn gtf_strand_mismatch() {
    let gtf = "chr1\tsrc\ttranscript\t1\t100\t.\t+\t.\ttranscript_id \"T9\";\n\
               chr1\tsrc\tCDS\t10\t90\t.\t-\t0\ttranscript_id \"T9\";\n";
    assert_matches!(convert_err(gtf), GtfError::StrandMismatch(..));
}

#[test]
fn gtf_transcript_without_exons() {
    let gtf = "chr1\tsrc\ttranscript\t1\t100\t.\t+\t.\ttranscript_id \"T9\";\n";
    assert_eq!(convert_err(gtf), GtfError::MissingExons("T9".to_owned()));
}

#[test]
fn gtf_short_row() {
    let gtf = "chr1\tsrc\ttranscript\t1\t100\n";
    assert_eq!(convert_err(gtf), GtfError::MalformedRow(1));
}
