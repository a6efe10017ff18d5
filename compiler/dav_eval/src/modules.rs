//! Importable modules.
//!
//! `import math` binds a module handle under the name it was imported by;
//! `math.sqrt(16)` and `math.pi` then resolve through that handle.

use std::f64::consts;

use rand::rngs::StdRng;
use rand::Rng;

use crate::builtins::{check_arity, float_to_int, number_arg, Builtin};
use crate::errors::{invalid_argument, type_mismatch, undefined_module_member, EvalResult};
use crate::value::Value;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Module {
    Math,
    Random,
}

impl Module {
    /// Look up a module by canonical id (see `dav_vocab::MODULE_IDS`).
    pub fn from_id(id: &str) -> Option<Self> {
        match id {
            "math" => Some(Module::Math),
            "random" => Some(Module::Random),
            _ => None,
        }
    }

    pub fn id(self) -> &'static str {
        match self {
            Module::Math => "math",
            Module::Random => "random",
        }
    }

    /// A constant member such as `math.pi`.
    pub fn constant(self, member: &str) -> EvalResult {
        match (self, member.to_lowercase().as_str()) {
            (Module::Math, "pi") => Ok(Value::Float(consts::PI)),
            (Module::Math, "e") => Ok(Value::Float(consts::E)),
            (Module::Math, "tau") => Ok(Value::Float(consts::TAU)),
            _ => Err(undefined_module_member(self.id(), member)),
        }
    }

    /// Call a function member.
    pub fn call(self, member: &str, args: &[Value], rng: &mut StdRng) -> EvalResult {
        let member = member.to_lowercase();
        match self {
            Module::Math => call_math(&member, args, rng),
            Module::Random => call_random(&member, args, rng),
        }
    }
}

fn call_math(member: &str, args: &[Value], rng: &mut StdRng) -> EvalResult {
    let name = format!("math.{member}");
    match member {
        "sqrt" => Builtin::Sqrt.call(args, rng),
        "pow" => Builtin::Power.call(args, rng),
        "abs" => Builtin::Abs.call(args, rng),
        "round" => Builtin::Round.call(args, rng),
        "floor" | "ceil" => {
            check_arity(&name, args, 1..=1)?;
            if let Value::Int(n) = args[0] {
                return Ok(Value::Int(n));
            }
            let x = number_arg(&name, &args[0])?;
            let rounded = if member == "floor" { x.floor() } else { x.ceil() };
            float_to_int(rounded, &name)
        }
        "sin" | "cos" | "tan" | "exp" => {
            check_arity(&name, args, 1..=1)?;
            let x = number_arg(&name, &args[0])?;
            Ok(Value::Float(match member {
                "sin" => x.sin(),
                "cos" => x.cos(),
                "tan" => x.tan(),
                _ => x.exp(),
            }))
        }
        "log" => {
            check_arity(&name, args, 1..=2)?;
            let x = number_arg(&name, &args[0])?;
            if x <= 0.0 {
                return Err(invalid_argument(&name, "logarithm of a non-positive number"));
            }
            match args.get(1) {
                None => Ok(Value::Float(x.ln())),
                Some(base) => {
                    let base = number_arg(&name, base)?;
                    if base <= 0.0 || base == 1.0 {
                        return Err(invalid_argument(&name, "invalid logarithm base"));
                    }
                    Ok(Value::Float(x.log(base)))
                }
            }
        }
        _ => Err(undefined_module_member("math", member)),
    }
}

fn call_random(member: &str, args: &[Value], rng: &mut StdRng) -> EvalResult {
    let name = format!("random.{member}");
    match member {
        "random" => Builtin::Random.call(args, rng),
        "randint" => Builtin::RandomInt.call(args, rng),
        "choice" => {
            check_arity(&name, args, 1..=1)?;
            let Value::List(items) = &args[0] else {
                return Err(invalid_argument(&name, type_mismatch("list", &args[0]).message));
            };
            let items = items.borrow();
            if items.is_empty() {
                return Err(invalid_argument(&name, "empty list"));
            }
            Ok(items[rng.gen_range(0..items.len())].clone())
        }
        "uniform" => {
            check_arity(&name, args, 2..=2)?;
            let low = number_arg(&name, &args[0])?;
            let high = number_arg(&name, &args[1])?;
            if !(low.is_finite() && high.is_finite()) || low > high {
                return Err(invalid_argument(&name, format!("empty range {low}..{high}")));
            }
            if low == high {
                return Ok(Value::Float(low));
            }
            if !(high - low).is_finite() {
                return Err(invalid_argument(&name, format!("range {low}..{high} is too wide")));
            }
            Ok(Value::Float(rng.gen_range(low..high)))
        }
        _ => Err(undefined_module_member("random", member)),
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests {
    use super::*;
    use crate::errors::EvalErrorKind;
    use pretty_assertions::assert_eq;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    #[test]
    fn math_members() {
        let mut rng = rng();
        assert_eq!(
            Module::Math.call("sqrt", &[Value::Int(16)], &mut rng).unwrap(),
            Value::Float(4.0)
        );
        assert_eq!(
            Module::Math.call("floor", &[Value::Float(2.7)], &mut rng).unwrap(),
            Value::Int(2)
        );
        assert_eq!(
            Module::Math.call("ceil", &[Value::Float(2.1)], &mut rng).unwrap(),
            Value::Int(3)
        );
        assert_eq!(
            Module::Math.call("pow", &[Value::Int(2), Value::Int(3)], &mut rng).unwrap(),
            Value::Int(8)
        );
        assert_eq!(Module::Math.constant("pi").unwrap(), Value::Float(consts::PI));
    }

    #[test]
    fn unknown_members_fail() {
        assert!(Module::Math.call("launch", &[], &mut rng()).is_err());
        assert!(Module::Random.constant("pi").is_err());
    }

    #[test]
    fn random_members_respect_bounds() {
        let mut rng = rng();
        let items = Value::list(vec![Value::Int(1), Value::Int(2)]);
        for _ in 0..50 {
            let picked = Module::Random.call("choice", &[items.clone()], &mut rng).unwrap();
            assert!(picked == Value::Int(1) || picked == Value::Int(2));
            let x = Module::Random
                .call("uniform", &[Value::Int(1), Value::Int(2)], &mut rng)
                .unwrap();
            assert!(matches!(x, Value::Float(x) if (1.0..2.0).contains(&x)));
        }
    }

    #[test]
    fn uniform_rejects_ranges_wider_than_a_float() {
        let err = Module::Random
            .call("uniform", &[Value::Float(-1e308), Value::Float(1e308)], &mut rng())
            .unwrap_err();
        assert!(matches!(err.kind, EvalErrorKind::InvalidArgument { .. }));
        assert!(Module::Random
            .call("uniform", &[Value::Float(-1e307), Value::Float(1e307)], &mut rng())
            .is_ok());
    }

    #[test]
    fn seeded_generators_repeat() {
        let first = Module::Random.call("random", &[], &mut rng()).unwrap();
        let second = Module::Random.call("random", &[], &mut rng()).unwrap();
        assert_eq!(first, second);
    }
}
