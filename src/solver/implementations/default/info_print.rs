use crate::io::{ConfigurablePrintTarget, PrintTarget};
use crate::{
    algebra::*,
    solver::core::cones::{SupportedConeAsTag, SupportedConeTag},
};
use std::io::Write;

use super::*;
use crate::solver::core::{
    cones::{CompositeCone, Cone},
    traits::InfoPrint,
    SolverStatus,
};

impl<T> ConfigurablePrintTarget for DefaultInfo<T> {
    fn print_to_stdout(&mut self) {
        self.stream.print_to_stdout()
    }
    fn print_to_file(&mut self, file: std::fs::File) {
        self.stream.print_to_file(file)
    }
    fn print_to_stream(&mut self, stream: Box<dyn Write + Send + Sync>) {
        self.stream.print_to_stream(stream)
    }
    fn print_to_sink(&mut self) {
        self.stream.print_to_sink()
    }
    fn print_to_buffer(&mut self) {
        self.stream.print_to_buffer()
    }
    fn get_print_buffer(&mut self) -> std::io::Result<String> {
        self.stream.get_print_buffer()
    }
}

macro_rules! expformat {
    ($fmt:expr,$val:expr) => {
        if $val.is_finite() {
            _exp_str_reformat(format!($fmt, $val))
        } else {
            format!($fmt, $val)
        }
    };
}

// column titles of the iteration table.  The horizontal rules in the
// header and footer span the width of this row
static ROW_TITLES: [&str; 8] = [
    " Iter ", " pri res ", " dua res ", " rel gap ", " pri obj ", " dua obj ", "  kappa  ",
    " time (s)",
];

fn _rule(ch: char) -> String {
    let width = ROW_TITLES.iter().map(|t| t.len() + 1).sum::<usize>() - 1;
    std::iter::repeat(ch).take(width).collect()
}

impl<T> InfoPrint<T> for DefaultInfo<T>
where
    T: FloatT,
{
    type D = DefaultProblemData<T>;
    type C = CompositeCone<T>;
    type SE = DefaultSettings<T>;

    fn print_configuration(
        &mut self,
        settings: &DefaultSettings<T>,
        data: &DefaultProblemData<T>,
        cones: &CompositeCone<T>,
        method: &str,
    ) -> std::io::Result<()> {
        if !settings.verbose {
            return std::io::Result::Ok(());
        }

        let out = &mut self.stream;

        writeln!(out, "{}", _rule('-'))?;
        writeln!(out)?;
        writeln!(
            out,
            "\tsplitcone v{} - operator splitting conic solver",
            crate::VERSION
        )?;
        writeln!(out)?;
        writeln!(out, "{}", _rule('-'))?;
        writeln!(out, "method: {method}")?;
        writeln!(
            out,
            "EPS = {}, ALPHA = {:.2}, MAX_ITERS = {}, NORMALIZE = {}",
            expformat!("{:.2e}", settings.eps),
            settings.alpha,
            settings.max_iter,
            settings.normalize as i32
        )?;
        writeln!(
            out,
            "variables n = {}, constraints m = {}, non-zeros in A = {}",
            data.n,
            data.m,
            data.A.nnz()
        )?;

        writeln!(out, "cones (total) = {}", cones.len())?;
        _print_conedims_by_type(out, cones, SupportedConeTag::ZeroCone)?;
        _print_conedims_by_type(out, cones, SupportedConeTag::NonnegativeCone)?;
        _print_conedims_by_type(out, cones, SupportedConeTag::SecondOrderCone)?;
        _print_conedims_by_type(out, cones, SupportedConeTag::ExponentialCone)?;
        _print_conedims_by_type(out, cones, SupportedConeTag::DualExponentialCone)?;

        std::io::Result::Ok(())
    }

    fn print_status_header(&mut self, settings: &DefaultSettings<T>) -> std::io::Result<()> {
        if !settings.verbose {
            return std::io::Result::Ok(());
        }

        let out = &mut self.stream;

        writeln!(out, "{}", _rule('-'))?;
        for title in &ROW_TITLES[..ROW_TITLES.len() - 1] {
            write!(out, "{title}|")?;
        }
        writeln!(out, "{}", ROW_TITLES[ROW_TITLES.len() - 1])?;
        writeln!(out, "{}", _rule('='))?;

        out.flush()?;
        std::io::Result::Ok(())
    }

    fn print_status(&mut self, settings: &DefaultSettings<T>) -> std::io::Result<()> {
        if !settings.verbose {
            return std::io::Result::Ok(());
        }

        let out = &mut self.stream;

        write!(out, "{:>6}|", self.iterations)?;
        write!(out, " {:>8} ", expformat!("{:.2e}", self.res_pri))?;
        write!(out, " {:>8} ", expformat!("{:.2e}", self.res_dual))?;
        write!(out, " {:>8} ", expformat!("{:.2e}", self.rel_gap))?;

        // the sign of a negative objective value takes over the
        // separator column
        let pobj = expformat!("{:.2e}", self.pobj);
        if self.pobj < T::zero() {
            write!(out, "{pobj:>8} ")?;
        } else {
            write!(out, " {pobj:>8} ")?;
        }
        let dobj = expformat!("{:.2e}", self.dobj);
        if self.dobj <= T::zero() {
            write!(out, "{dobj:>8} ")?;
        } else {
            write!(out, " {dobj:>8} ")?;
        }

        write!(out, " {:>8} ", expformat!("{:.2e}", self.kap))?;
        write!(out, " {:>8} ", expformat!("{:.2e}", self.solve_time))?;
        writeln!(out)?;

        std::io::Result::Ok(())
    }

    fn print_footer(&mut self, settings: &DefaultSettings<T>, summary: &str) -> std::io::Result<()> {
        if !settings.verbose {
            return std::io::Result::Ok(());
        }

        let out = &mut self.stream;

        writeln!(out, "{}", _rule('-'))?;
        writeln!(out, "Status: {}", self.status)?;
        if self.iterations == settings.max_iter {
            writeln!(out, "Hit MAX_ITERS, solution may be inaccurate")?;
        }
        writeln!(out, "Time taken: {:.4} seconds", self.solve_time)?;
        write!(out, "{summary}")?;
        writeln!(out, "{}", _rule('-'))?;

        match self.status {
            SolverStatus::Infeasible => {
                writeln!(out, "Certificate of primal infeasibility:")?;
                writeln!(
                    out,
                    "|A'y|_2 * |b|_2 = {}",
                    expformat!("{:.4e}", self.res_dual)
                )?;
                writeln!(out, "dist(y, K*) = 0")?;
                writeln!(out, "b'y = {:.4}", self.dobj)?;
            }
            SolverStatus::Unbounded => {
                writeln!(out, "Certificate of dual infeasibility:")?;
                writeln!(
                    out,
                    "|Ax + s|_2 * |c|_2 = {}",
                    expformat!("{:.4e}", self.res_pri)
                )?;
                writeln!(out, "dist(s, K) = 0")?;
                writeln!(out, "c'x = {:.4}", self.pobj)?;
            }
            _ => {
                writeln!(out, "Error metrics:")?;
                writeln!(
                    out,
                    "|Ax + s - b|_2 / (1 + |b|_2) = {}",
                    expformat!("{:.4e}", self.res_pri)
                )?;
                writeln!(
                    out,
                    "|A'y + c|_2 / (1 + |c|_2) = {}",
                    expformat!("{:.4e}", self.res_dual)
                )?;
                writeln!(
                    out,
                    "|c'x + b'y| / (1 + |c'x| + |b'y|) = {}",
                    expformat!("{:.4e}", self.rel_gap)
                )?;
                writeln!(out, "dist(s, K) = 0, dist(y, K*) = 0, s'y = 0")?;
                writeln!(out, "{}", _rule('-'))?;
                writeln!(out, "c'x = {:.4}, -b'y = {:.4}", self.pobj, self.dobj)?;
            }
        }
        writeln!(out, "{}", _rule('='))?;

        out.flush()?;
        std::io::Result::Ok(())
    }
}

fn _print_conedims_by_type<T: FloatT>(
    out: &mut PrintTarget,
    cones: &CompositeCone<T>,
    conetag: SupportedConeTag,
) -> std::io::Result<()> {
    let maxlistlen = 5;

    let count = cones.get_type_count(conetag);

    //skip if there are none of this type
    if count == 0 {
        return std::io::Result::Ok(());
    }

    // drops trailing "Cone" part of name
    let name = conetag.as_str();
    let name = &name[0..name.len() - 4];
    let name = format!("{name:>11}");

    let mut nvars = Vec::with_capacity(count);
    for cone in cones.iter() {
        if cone.as_tag() == conetag {
            nvars.push(cone.numel());
        }
    }
    write!(out, "    : {name} = {count}, ")?;

    if count == 1 {
        write!(out, " numel = {}", nvars[0])?;
    } else if count <= maxlistlen {
        //print them all
        write!(out, " numel = (")?;
        for nvar in nvars.iter().take(nvars.len() - 1) {
            write!(out, "{nvar},")?;
        }
        write!(out, "{})", nvars[nvars.len() - 1])?;
    } else {
        // print first (maxlistlen-1) and the final one
        write!(out, " numel = (")?;
        for nvar in nvars.iter().take(maxlistlen - 1) {
            write!(out, "{nvar},")?;
        }
        write!(out, "...,{})", nvars[nvars.len() - 1])?;
    }

    writeln!(out)?;

    std::io::Result::Ok(())
}

// convert a string in LowerExp display format into one that
// 1) always has a sign after the exponent, and
// 2) has at least two digits in the exponent.
// This matches the C-style %e output formatting.

fn _exp_str_reformat(mut thestr: String) -> String {
    // Safe to `unwrap` as `num` is guaranteed to contain `'e'`
    let eidx = thestr.find('e').unwrap();
    let has_sign = thestr.chars().nth(eidx + 1).unwrap() == '-';

    let has_short_exp = {
        if !has_sign {
            thestr.len() == eidx + 2
        } else {
            thestr.len() == eidx + 3
        }
    };

    let chars;
    if !has_sign {
        if has_short_exp {
            chars = "+0";
        } else {
            chars = "+";
        }
    } else if has_short_exp {
        chars = "0";
    } else {
        chars = "";
    }

    let shift = if has_sign { 2 } else { 1 };
    thestr.insert_str(eidx + shift, chars);
    thestr
}
