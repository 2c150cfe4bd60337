#![allow(non_snake_case)]
use crate::{
    algebra::*,
    solver::{core::SolverJSONReadWrite, DefaultSettings, DefaultSolver, SupportedConeT},
};

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::io::Write;
use std::{fs::File, io, io::Read};

// A struct very similar to the problem data, but containing only
// the data types provided by the user (i.e. no internal types).

#[derive(Serialize, Deserialize)]
#[serde(bound = "T: Serialize + DeserializeOwned")]
struct JsonProblemData<T: FloatT> {
    pub A: CscMatrix<T>,
    pub b: Vec<T>,
    pub c: Vec<T>,
    pub cones: Vec<SupportedConeT>,
    pub settings: DefaultSettings<T>,
}

impl<T> SolverJSONReadWrite for DefaultSolver<T>
where
    T: FloatT + DeserializeOwned + Serialize,
{
    fn write_to_file(&self, file: &mut File) -> Result<(), io::Error> {
        // the internal data carries the equilibration scaling, so
        // export clones restored to the user's values
        let (A, b, c) = self.data.user_data();

        let json_data = JsonProblemData {
            A,
            b,
            c,
            cones: self.data.cone_dims.clone(),
            settings: self.settings.clone(),
        };

        let json = serde_json::to_string(&json_data)?;
        file.write_all(json.as_bytes())?;

        Ok(())
    }

    fn read_from_file(file: &mut File) -> Result<Self, io::Error> {
        let mut buffer = String::new();
        file.read_to_string(&mut buffer)?;
        let json_data: JsonProblemData<T> = serde_json::from_str(&buffer)?;

        Self::new(
            &json_data.A,
            &json_data.b,
            &json_data.c,
            &json_data.cones,
            json_data.settings,
        )
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e.to_string()))
    }
}

#[test]
fn test_json_io() {
    use crate::solver::FirstOrderSolver;
    use std::io::{Seek, SeekFrom};

    // min x subject to 0 <= x <= 1
    let A = CscMatrix {
        m: 2,
        n: 1,
        colptr: vec![0, 2],
        rowval: vec![0, 1],
        nzval: vec![-1.0, 1.0],
    };
    let b = [0.0, 1.0];
    let c = [1.0];
    let cones = vec![crate::solver::SupportedConeT::NonnegativeConeT(2)];

    let settings = crate::solver::DefaultSettingsBuilder::default()
        .verbose(false)
        .build()
        .unwrap();

    let mut solver =
        crate::solver::DefaultSolver::<f64>::new(&A, &b, &c, &cones, settings).unwrap();
    solver.solve();

    // write the problem to a file
    let mut file = tempfile::tempfile().unwrap();
    solver.write_to_file(&mut file).unwrap();

    // read the problem from the file
    file.seek(SeekFrom::Start(0)).unwrap();
    let mut solver2 = crate::solver::DefaultSolver::<f64>::read_from_file(&mut file).unwrap();
    solver2.solve();

    // the round trip passes through the equilibration inverse, so
    // the data and hence the solutions agree only to roundoff
    for (x1, x2) in solver.solution.x.iter().zip(solver2.solution.x.iter()) {
        assert!((x1 - x2).abs() < 1e-10);
    }
}
