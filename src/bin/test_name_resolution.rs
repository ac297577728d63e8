use invigil::explode::split_invigilators;
use invigil::identity::{IdentityResolver, NameCanonicalizer};

fn main() {
    println!("Name Resolution Test Tool");
    println!("-------------------------");

    let names = NameCanonicalizer::new();
    let resolver = IdentityResolver::new();

    // Test cell splitting
    println!("\nCell Splitting Tests:");
    let cells = [
        "John Doe, A. Smith",
        "KOFI ANNAN; AMA SERWAA / YAW BOATENG",
        "JohnA. Smith",
        "Doe J\nMensah K.",
    ];

    for cell in &cells {
        println!("{:?} → {:?}", cell, split_invigilators(cell));
    }

    // Test canonicalization
    println!("\nCanonicalization Tests:");
    let raw_names = [
        "J.Mensah",
        "J. Mensah",
        "MensahJ.",
        "  KWAME   OWUSU ",
        "Ama Serwaa - Boateng",
        "Dr. (Mrs) E. Adjei*",
    ];

    for raw in &raw_names {
        let canonical = names.canonicalize(raw);
        println!("'{}' → '{}' ({})", raw, canonical.display, canonical.key);
    }

    // Test similarity
    println!("\nSimilarity Tests:");
    let pairs = [
        ("kwameasantewaa", "kwameasantewa"), // dropped letter
        ("emmanueladjei", "emmanueladjie"),  // transposition
        ("jmensah", "kmensah"),              // Should NOT match
        ("johndoe", "doejohn"),              // anagram pass only
    ];

    for (a, b) in &pairs {
        println!(
            "'{}' vs '{}': {:.3} {}",
            a,
            b,
            resolver.similarity(a, b),
            if resolver.is_variant(a, b) {
                "MATCH"
            } else {
                "NO MATCH"
            }
        );
    }

    // Test clustering over a document's worth of names
    println!("\nClustering Test:");
    let document = [
        "Doe John",
        "J.Mensah",
        "Kwame Asantewaa",
        "John Doe",
        "J. Mensah",
        "Kwame Asantewa",
        "Mensah J.",
    ];
    let keys: Vec<String> = document
        .iter()
        .map(|raw| names.canonicalize(raw).key)
        .collect();
    let identities = resolver.resolve(keys.iter().map(String::as_str));

    for cluster in identities.clusters() {
        println!("{} ← {:?}", cluster.canonical_key, cluster.members);
    }
}
