use xcc_dlx::{Builder, Heuristic};

// Three options each cover the same lone primary item on their own, so each
// is itself a complete exact cover: the search should enumerate all three.

fn main() {
    let mut b = Builder::new();
    b.define_primary_item("a").unwrap();
    b.prepare_options().unwrap();
    for _ in 0..3 {
        b.begin_option().unwrap();
        b.add_item(1).unwrap();
        b.end_option().unwrap();
    }
    b.end_options().unwrap();

    let driver = b.build(Heuristic::Naive).unwrap();
    let mut count = 0;
    for solution in driver {
        let solution = solution.unwrap();
        println!("solution {}: {:?}", count + 1, solution.option_indices());
        count += 1;
    }
    println!("found {count} solutions");
}
