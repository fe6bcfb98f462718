use xcc_dlx::{Builder, Heuristic};

// Knuth's standard exact-cover fixture (TAOCP 7.2.2.1, Table 1):
//     a   b   c   d   e   f   g
// 1           x       x
// 2   x           x       x
// 3       x   x           x
// 4   x           x   x
// 5       x               x
// 6               x   x       x
//
// The only exact cover is options {1, 4, 5}.

fn main() {
    let mut b = Builder::new();
    for name in ["a", "b", "c", "d", "e", "f", "g"] {
        b.define_primary_item(name).unwrap();
    }
    b.prepare_options().unwrap();

    for option in [
        vec!["c", "e"],
        vec!["a", "d", "g"],
        vec!["b", "c", "f"],
        vec!["a", "d", "f"],
        vec!["b", "g"],
        vec!["d", "e", "g"],
    ] {
        b.begin_option().unwrap();
        for name in option {
            let idx = b.item_index(name).unwrap();
            b.add_item(idx).unwrap();
        }
        b.end_option().unwrap();
    }
    b.end_options().unwrap();

    let mut driver = b.build(Heuristic::Mrv).unwrap();
    match driver.next_solution().unwrap() {
        Some(solution) => println!("solution: {:?}", solution.option_indices()),
        None => println!("no solution"),
    }
}
