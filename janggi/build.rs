use std::path::Path;
use std::{env, io};

mod near {
    use std::io::{self, BufWriter, Write};
    use std::{fs, path::Path};

    use janggi_base::geometry;
    use janggi_base::squareset::SquareSet;
    use janggi_base::types::Square;

    fn generate_directed<const N: usize>(d_file: [isize; N], d_rank: [isize; N]) -> [SquareSet; 90] {
        let mut res = [SquareSet::EMPTY; 90];
        for sq in Square::iter() {
            let mut set = SquareSet::EMPTY;
            for (&delta_file, &delta_rank) in d_file.iter().zip(d_rank.iter()) {
                if let Some(nsq) = sq.try_shift(delta_file, delta_rank) {
                    set.set(nsq);
                }
            }
            res[sq.index()] = set;
        }
        res
    }

    fn generate_palace_diagonals() -> [SquareSet; 90] {
        let mut res = [SquareSet::EMPTY; 90];
        for sq in Square::iter() {
            res[sq.index()] = geometry::palace_diagonal_neighbors(sq);
        }
        res
    }

    fn print_sets<W: Write>(w: &mut W, name: &str, sets: [SquareSet; 90]) -> io::Result<()> {
        writeln!(w, "const {}: [SquareSet; 90] = [", name)?;
        for (i, s) in sets.iter().enumerate() {
            writeln!(w, "    /*{:2}*/ ss(0x{:032x}),", i, s.as_raw())?;
        }
        writeln!(w, "];")?;
        Ok(())
    }

    pub fn gen(out_path: &Path) -> io::Result<()> {
        let f = fs::File::create(out_path)?;
        let mut w = BufWriter::new(&f);

        print_sets(
            &mut w,
            "ORTHOGONAL_NEIGHBORS",
            generate_directed([0, 0, -1, 1], [-1, 1, 0, 0]),
        )?;
        writeln!(&mut w)?;
        print_sets(&mut w, "PALACE_DIAGONALS", generate_palace_diagonals())?;

        Ok(())
    }
}

fn main() -> io::Result<()> {
    println!("cargo:rerun-if-changed=build.rs");

    let out_dir = env::var("OUT_DIR").unwrap();

    near::gen(&Path::new(&out_dir).join("near.rs"))?;

    Ok(())
}
