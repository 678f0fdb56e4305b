use std::process;

use go_enrich::enrichment::{analyze, EnrichmentConfig};
use go_enrich::parser;

fn main() {
    let mut args = std::env::args();
    if args.len() < 4 {
        println!("Run a GO term enrichment analysis\n");
        println!("Usage\nenrichment go-basic.obo goa_human.gaf subset.txt <THRESHOLD>\n");
        println!("subset.txt contains one gene product accession per line");
        process::exit(1)
    }

    let obo_file = args.nth(1).unwrap();
    let gaf_file = args.next().unwrap();
    let subset_file = args.next().unwrap();
    let threshold = args
        .next()
        .map(|arg| arg.parse::<f64>().unwrap_or(0.05))
        .unwrap_or(0.05);

    let ontology = parser::obo::read_file(&obo_file).expect("unable to read the obo file");
    let background = parser::gaf::read_file(&gaf_file).expect("unable to read the GAF file");

    let accessions =
        std::fs::read_to_string(&subset_file).expect("unable to read the subset file");
    let subset = background.subset(accessions.lines().map(str::trim));

    let config = EnrichmentConfig {
        threshold,
        ..Default::default()
    };
    let result = analyze(&ontology, &background, &subset, &config).expect("enrichment failed");

    println!("id\tname\tp\tp.adjusted\tsubset\tbackground");
    for term in result.terms() {
        println!(
            "{}\t{}\t{:e}\t{:e}\t{}\t{}",
            term.id(),
            term.name(),
            term.pvalue(),
            term.corrected_pvalue(),
            term.subset_frequency(),
            term.background_frequency()
        );
    }

    println!(
        "\nTested: {}\nSignificant: {}\nSignificant after correction: {}",
        result.n_tested(),
        result.n_significant(),
        result.n_significant_corrected()
    );
}
