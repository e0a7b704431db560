#[macro_use]
extern crate matches;
extern crate bedline;

use bedline::{BedError, BedKind, BedReader, BedRecord, Error, ExonSelection, Strand,
              TransformError, UtrEnd};


static TRANSCRIPTS_BED: &'static str = include_str!("data/transcripts.bed");


fn bed(fields: &[&str]) -> BedRecord {
    BedRecord::from_fields(fields).expect("a valid record")
}

/// Reflects a BED12 record around position `axis`, swapping its strand.
///
/// An empty coding region is placed at the start of the reflected record.
fn mirror(record: &BedRecord, axis: u64) -> BedRecord {
    let (start, end) = (axis - record.end(), axis - record.start());
    let (cds_start, cds_end) = match record.cds_coord() {
        Some((cds_start, cds_end)) => (axis - cds_end, axis - cds_start),
        None => (start, start),
    };
    let strand = match record.strand() {
        Strand::Forward => "-",
        Strand::Reverse => "+",
        Strand::Unknown => ".",
    };
    let span = record.span();
    let blocks = record.blocks().iter().rev()
        .map(|b| (span - b.end(), b.len()))
        .collect::<Vec<(u64, u64)>>();
    let lengths = blocks.iter().map(|b| b.1.to_string()).collect::<Vec<String>>().join(",");
    let starts = blocks.iter().map(|b| b.0.to_string()).collect::<Vec<String>>().join(",");
    BedRecord::from_fields(&[
        record.chrom().to_owned(), start.to_string(), end.to_string(), record.name().to_owned(),
        "0".to_owned(), strand.to_owned(), cds_start.to_string(), cds_end.to_string(),
        ".".to_owned(), blocks.len().to_string(), lengths, starts,
    ]).expect("a valid record")
}

/// Genomic intervals covered by the blocks of a BED12 record.
fn genome_intervals(record: &BedRecord) -> Vec<(u64, u64)> {
    record.blocks().iter()
        .map(|b| (record.start() + b.start(), record.start() + b.end()))
        .collect()
}

#[test]
fn known_promoters() {
    let cases = [
        (["chr1", "1000", "2000", "Name", "0", "+"], ["chr1", "500", "1500", "Name"]),
        (["chr1", "1000", "2000", "Name", "0", "-"], ["chr1", "1500", "2500", "Name"]),
        (["chr1", "100", "200", "Name", "0", "+"], ["chr1", "0", "600", "Name"]),
        (["chr1", "100", "200", "Name", "0", "-"], ["chr1", "0", "700", "Name"]),
    ];
    for (input, expected) in cases.iter() {
        let prom = bed(input).promoter(500, 500, true).expect("a promoter");
        assert_eq!(prom, bed(expected));
        assert_eq!(prom.kind(), BedKind::Bed4);
    }
}

#[test]
fn known_promoters_100() {
    let cases = [
        (["chr1", "1000", "2000", "Name", "0", "+"], ["chr1", "900", "1100", "Name"]),
        (["chr1", "1000", "2000", "Name", "0", "-"], ["chr1", "1900", "2100", "Name"]),
        (["chr1", "50", "100", "Name", "0", "+"], ["chr1", "0", "150", "Name"]),
        (["chr1", "10", "80", "Name", "0", "-"], ["chr1", "0", "180", "Name"]),
    ];
    for (input, expected) in cases.iter() {
        assert_eq!(bed(input).promoter(100, 100, true).expect("a promoter"), bed(expected));
    }
}

#[test]
fn known_promoters_unstranded() {
    for strand in &["+", "-", "."] {
        let rec = bed(&["chr1", "1000", "2000", "Name", "0", *strand]);
        assert_eq!(rec.promoter(500, 500, false).expect("a promoter"),
                   bed(&["chr1", "500", "1500", "Name"]));
    }
}

#[test]
fn bad_records() {
    let cases: &[&[&str]] = &[
        &["chr1", "1000", "200", "Name", "0", "+"],
        &["chr1", "1000", "a", "Name", "0", "+"],
        &["chr1", "a", "2000", "Name", "0", "+"],
        &["chr1", "1000", "2000", "Name", "0", "a"],
        &["chr1", "1000", "2000", "Name", "0", "+", "1000", "1000"],
        &["chr1", "1000", "2000", "Name", "0", "+", "1000", "1000", ".", "a", "10,10,10,",
          "0,100,200,"],
        &["chr1", "1000", "2000", "Name", "0", "+", "a", "1000", ".", "3", "10,10,10,",
          "0,100,200,"],
        &["chr1", "1000", "2000", "Name", "0", "+", "1000", "a", ".", "3", "10,10,10,",
          "0,100,200,"],
        &["chr1", "1000", "2000", "Name", "0", "+", "1000", "900", ".", "3", "10,10,10,",
          "0,100,200,"],
        &["chr1", "1000", "2000", "Name", "0", "+", "100", "900", ".", "3", "10,10,10,",
          "0,100,200,"],
        &["chr1", "1000", "2000", "Name", "0", "+", "1500", "2001", ".", "3", "10,10,10,",
          "0,100,200,"],
        &["chr1", "1000", "2000", "Name", "0", "+", "1500", "2000", ".", "3", "10,10,10,10,",
          "0,100,200,"],
        &["chr1", "1000", "2000", "Name", "0", "+", "1500", "2000", ".", "3", "10,10,",
          "0,100,200,"],
        &["chr1", "1000", "2000", "Name", "0", "+", "1500", "2000", ".", "3", "10,10,10,",
          "0,100,"],
        &["chr1", "1000", "2000", "Name", "0", "+", "1500", "2000", ".", "3", "10,10,10,",
          "0,100,200,300,"],
        &["chr1", "1000", "2000", "Name", "0", "+", "1500", "2000", ".", "3", "10,10,a,",
          "0,100,200,"],
        &["chr1", "1000", "2000", "Name", "0", "+", "1500", "2000", ".", "3", "10,10,10,",
          "0,100,b,"],
    ];
    for fields in cases {
        let err = BedRecord::from_fields(*fields).expect_err("an invalid record");
        assert!(err.to_string().contains("Name"), "error without record name: {}", err);
    }
}

#[test]
fn bad_record_kinds() {
    let err = BedRecord::from_fields(&["chr1", "1000", "200", "Name", "0", "+"]).unwrap_err();
    assert_matches!(err, BedError::InvalidRange(..));
    let err = BedRecord::from_fields(&["chr1", "1000", "2000", "Name", "0", "+", "1000", "1000"])
        .unwrap_err();
    assert_matches!(err, BedError::UnsupportedSchema(8, _));
    let err = BedRecord::from_fields(&["chr1", "1000", "2000", "Name", "0", "+", "1500", "2000",
                                       ".", "3", "10,10,a,", "0,100,200,"]).unwrap_err();
    assert_matches!(err, BedError::InvalidBlockList(..));
}

#[test]
fn block_lists_without_trailing_comma() {
    let with = bed(&["chr1", "1000", "2000", "Name", "0", "+", "1500", "2000", ".", "3",
                     "10,10,10,", "0,100,200,"]);
    let without = bed(&["chr1", "1000", "2000", "Name", "0", "+", "1500", "2000", ".", "3",
                        "10,10,10", "0,100,200"]);
    assert_eq!(with, without);
    assert_eq!(without.to_fields()[10], "10,10,10,");
}

#[test]
fn known_5p_utrs() {
    let cases = [
        (["chr1", "100", "420", "Name", "0", "+", "210", "310", ".", "4", "20,20,20,20,",
          "0,100,200,300,"],
         ["chr1", "100", "210", "Name", "0", "+", "100", "100", ".", "2", "20,10,", "0,100,"]),
        (["chr1", "100", "500", "Name", "0", "+", "200", "300", ".", "1", "400,", "0,"],
         ["chr1", "100", "200", "Name", "0", "+", "100", "100", ".", "1", "100,", "0,"]),
        (["chr1", "100", "500", "Name", "0", "-", "200", "300", ".", "1", "400,", "0,"],
         ["chr1", "300", "500", "Name", "0", "-", "300", "300", ".", "1", "200,", "0,"]),
        (["chr1", "100", "420", "Name", "0", "-", "210", "310", ".", "4", "20,20,20,20,",
          "0,100,200,300,"],
         ["chr1", "310", "420", "Name", "0", "-", "310", "310", ".", "2", "10,20,", "0,90,"]),
    ];
    for (input, expected) in cases.iter() {
        let utr = bed(input).utr(UtrEnd::Five).expect("no error").expect("a UTR");
        assert_eq!(utr, bed(expected));
    }
}

#[test]
fn known_3p_utrs() {
    let cases = [
        (["chr1", "100", "420", "Name", "0", "+", "210", "310", ".", "4", "20,20,20,20,",
          "0,100,200,300,"],
         ["chr1", "310", "420", "Name", "0", "+", "310", "310", ".", "2", "10,20,", "0,90,"]),
        (["chr1", "100", "500", "Name", "0", "-", "200", "300", ".", "1", "400,", "0,"],
         ["chr1", "100", "200", "Name", "0", "-", "100", "100", ".", "1", "100,", "0,"]),
        (["chr1", "100", "500", "Name", "0", "+", "200", "300", ".", "1", "400,", "0,"],
         ["chr1", "300", "500", "Name", "0", "+", "300", "300", ".", "1", "200,", "0,"]),
        (["chr1", "100", "420", "Name", "0", "-", "210", "310", ".", "4", "20,20,20,20,",
          "0,100,200,300,"],
         ["chr1", "100", "210", "Name", "0", "-", "100", "100", ".", "2", "20,10,", "0,100,"]),
    ];
    for (input, expected) in cases.iter() {
        let utr = bed(input).utr(UtrEnd::Three).expect("no error").expect("a UTR");
        assert_eq!(utr, bed(expected));
    }
}

#[test]
fn known_cdss() {
    let cases = [
        (["chr1", "100", "420", "Name", "0", "+", "210", "310", ".", "4", "20,20,20,20,",
          "0,100,200,300,"],
         ["chr1", "210", "310", "Name", "0", "+", "210", "310", ".", "2", "10,10,", "0,90,"]),
        (["chr1", "100", "420", "Name", "0", "-", "210", "310", ".", "4", "20,20,20,20,",
          "0,100,200,300,"],
         ["chr1", "210", "310", "Name", "0", "-", "210", "310", ".", "2", "10,10,", "0,90,"]),
        (["chr1", "100", "500", "Name", "0", "-", "200", "300", ".", "1", "400,", "0,"],
         ["chr1", "200", "300", "Name", "0", "-", "200", "300", ".", "1", "100,", "0,"]),
        (["chr1", "100", "500", "Name", "0", "+", "200", "300", ".", "1", "400,", "0,"],
         ["chr1", "200", "300", "Name", "0", "+", "200", "300", ".", "1", "100,", "0,"]),
    ];
    for (input, expected) in cases.iter() {
        let cds = bed(input).cds(false).expect("no error").expect("a CDS");
        assert_eq!(cds, bed(expected));
    }
}

#[test]
fn cds_of_unstranded_bed3() {
    let err = bed(&["chr1", "100", "200"]).cds(false).unwrap_err();
    assert_matches!(err, Error::Transform(TransformError::UnstrandedOperation(..)));
}

#[test]
fn utr_of_stranded_bed6() {
    let err = bed(&["chr1", "100", "200", "Name", "0", "-"]).utr(UtrEnd::Three).unwrap_err();
    assert_matches!(err, Error::Transform(TransformError::WrongSchema(..)));
}

#[test]
fn regions_partition_the_transcript() {
    let mut reader = BedReader::from_reader(TRANSCRIPTS_BED.as_bytes());
    for result in reader.records() {
        let rec = result.expect("a valid record");
        if !rec.has_cds() {
            continue;
        }
        let mut intervals = vec![];
        let parts = vec![rec.utr(UtrEnd::Five).unwrap(), rec.cds(false).unwrap(),
                         rec.utr(UtrEnd::Three).unwrap(), rec.introns().unwrap()];
        for part in parts.into_iter().flatten() {
            intervals.extend(genome_intervals(&part));
        }
        intervals.sort();

        let mut expected_start = rec.start();
        for (start, end) in intervals.iter() {
            // Adjacent blocks of the same region may touch; nothing may overlap or leave a gap.
            assert_eq!(*start, expected_start, "gap or overlap in {}", rec.name());
            assert!(end > start);
            expected_start = *end;
        }
        assert_eq!(expected_start, rec.end(), "region of {} not covered", rec.name());
    }
}

#[test]
fn utrs_of_reflected_records() {
    const AXIS: u64 = 10_000;
    let mut records = BedReader::from_reader(TRANSCRIPTS_BED.as_bytes())
        .records()
        .collect::<Result<Vec<BedRecord>, Error>>()
        .expect("valid records");
    let boundaries: &[&[&str]] = &[
        // Coding region starting exactly at a block start.
        &["chr1", "100", "420", "B1", "0", "+", "200", "310", ".", "4", "20,20,20,20,",
          "0,100,200,300,"],
        // Coding region ending exactly at a block end.
        &["chr1", "100", "420", "B2", "0", "+", "210", "320", ".", "4", "20,20,20,20,",
          "0,100,200,300,"],
        &["1", "100", "160", "B3", "0", "+", "150", "160", ".", "2", "10,10,", "0,50,"],
        &["chr1", "100", "200", "B4", "0", "-", "100", "120", ".", "2", "20,30,", "0,70,"],
    ];
    records.extend(boundaries.iter().map(|fields| bed(fields)));

    for rec in records.iter() {
        let reflected = mirror(rec, AXIS);
        for which in &[UtrEnd::Five, UtrEnd::Three] {
            let expected = rec.utr(*which).unwrap().map(|utr| mirror(&utr, AXIS));
            assert_eq!(reflected.utr(*which).unwrap(), expected,
                       "{:?} UTR mismatch for {}", which, rec.name());
        }
    }
}

#[test]
fn serialized_records_parse_back() {
    let mut reader = BedReader::from_reader(TRANSCRIPTS_BED.as_bytes());
    for result in reader.records() {
        let rec = result.expect("a valid record");
        let again = rec.to_string().parse::<BedRecord>().expect("a valid record");
        assert_eq!(rec, again);
    }
}

#[test]
fn tx_to_genome_is_monotonic() {
    let mut reader = BedReader::from_reader(TRANSCRIPTS_BED.as_bytes());
    for result in reader.records() {
        let rec = result.expect("a valid record");
        let total = rec.blocks().total_len() as i64;
        let intervals = genome_intervals(&rec);
        let mut prev: Option<u64> = None;
        for coord in 0..total {
            let pos = rec.tx_to_genome(coord, true).expect("a coordinate");
            assert!(intervals.iter().any(|&(s, e)| s <= pos && pos < e));
            if let Some(prev) = prev {
                match rec.strand() {
                    Strand::Reverse => assert!(pos < prev),
                    _ => assert!(pos > prev),
                }
            }
            prev = Some(pos);
        }
        assert_matches!(rec.tx_to_genome(total, true),
                        Err(Error::Transform(TransformError::CoordinateOutOfRange(..))));
    }
}

#[test]
fn block_split_in_genome_order() {
    let rec = bed(&["chr1", "100", "420", "Name", "0", "-", "210", "310", ".", "4",
                    "20,20,20,20,", "0,100,200,300,"]);
    let exons = rec.block_split(true, ExonSelection::All).expect("exons");
    let starts = exons.iter().map(|e| e.start()).collect::<Vec<u64>>();
    assert_eq!(starts, vec![100, 200, 300, 400]);
    assert_eq!(exons[3].to_string(), "chr1\t400\t420\tName_Exon004\t0\t-");
    assert!(exons.iter().all(|e| e.kind() == BedKind::Bed6));
}

#[test]
fn noncoding_transcript() {
    let rec = bed(&["chr3", "1000", "1600", "TX5", "0", "+", "1600", "1600", "0", "3",
                    "100,100,100,", "0,250,500,"]);
    assert_eq!(rec.utr(UtrEnd::Five).unwrap(), None);
    assert_eq!(rec.utr(UtrEnd::Three).unwrap(), None);
    assert_eq!(rec.cds(false).unwrap(), None);
    let introns = rec.introns().unwrap().expect("introns");
    assert_eq!(introns.to_string(),
               "chr3\t1100\t1500\tTX5\t0\t+\t1100\t1100\t0\t2\t150,150,\t0,250,");
}
