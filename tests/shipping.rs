//! Address validation and shipping, piped through carriers.

use sumpipe::{
    lift, reify, reify2,
    tag::{U0, U3},
    DynFn, DynSum, Reified, Sum, Witness,
};

const KNOWN_STATES: &[&str] = &["AK", "AL", "AZ", "CA", "CO", "NY", "TX", "WA"];

#[derive(Debug, Clone, PartialEq)]
struct NoAddress;

#[derive(Debug, Clone, PartialEq)]
struct InvalidAddress(String);

#[derive(Debug, Clone, PartialEq)]
struct Address {
    state: String,
}

#[derive(Debug, Clone, PartialEq)]
struct Shipment {
    to: Address,
}

#[derive(Debug, Clone, PartialEq)]
struct ShippingError {
    reason: &'static str,
}

#[derive(Debug, Clone, PartialEq)]
struct UnknownState(String);

fn reject_empty() -> impl Reified<Input = String, Outputs = sumpipe::T![String, NoAddress]> {
    reify2(|raw: String| if raw.trim().is_empty() { Err(NoAddress) } else { Ok(raw) })
}

fn validate() -> impl Reified<Input = String, Outputs = sumpipe::T![Address, InvalidAddress]> {
    reify2(|raw: String| {
        let state = raw.trim();
        if KNOWN_STATES.contains(&state) {
            Ok(Address {
                state: state.to_string(),
            })
        } else {
            Err(InvalidAddress(raw))
        }
    })
}

/// Shipping to Alaska is simulated as unavailable.
fn ship() -> impl Reified<Input = Address, Outputs = sumpipe::T![Shipment, ShippingError]> {
    reify2(|to: Address| {
        if to.state == "AK" {
            Err(ShippingError {
                reason: "carrier unavailable",
            })
        } else {
            Ok(Shipment { to })
        }
    })
}

fn recover() -> impl Reified<Input = InvalidAddress, Outputs = sumpipe::T![Address, UnknownState]> {
    reify2(|InvalidAddress(raw): InvalidAddress| {
        if raw.to_ascii_uppercase().contains("CO") {
            Ok(Address {
                state: "CO".to_string(),
            })
        } else {
            Err(UnknownState(raw))
        }
    })
}

type Shipped = Sum![Shipment, ShippingError, InvalidAddress, NoAddress];

fn ship_raw(raw: &str) -> Shipped {
    lift(raw.to_string()) | reject_empty() | validate() | ship()
}

#[test]
fn known_state_ships() {
    let shipped = ship_raw("CO");
    assert_eq!(
        shipped.get::<Shipment, _>(),
        Some(&Shipment {
            to: Address {
                state: "CO".to_string()
            }
        })
    );
    assert_eq!(shipped.arity(), 4);
}

#[test]
fn each_failure_keeps_its_alternative() {
    let shipped = ship_raw("ColoraDo, the Sunny State");
    assert_eq!(
        shipped.get::<InvalidAddress, _>(),
        Some(&InvalidAddress("ColoraDo, the Sunny State".to_string()))
    );

    assert_eq!(ship_raw("   ").get::<NoAddress, _>(), Some(&NoAddress));
    assert_eq!(
        ship_raw("AK").get::<ShippingError, _>().map(|e| e.reason),
        Some("carrier unavailable")
    );
}

#[test]
fn recovery_out_of_position_keeps_error_alternatives() {
    let shipped = ship_raw("ColoraDo, the Sunny State");
    let recovered: Sum![Address, UnknownState, Shipment, ShippingError, InvalidAddress, NoAddress] =
        shipped.pipe_any(recover());

    assert_eq!(recovered.arity(), 6);
    assert_eq!(
        recovered.get::<Address, _>(),
        Some(&Address {
            state: "CO".to_string()
        })
    );

    let declared = Sum::<sumpipe::T![
        Address,
        UnknownState,
        Shipment,
        ShippingError,
        InvalidAddress,
        NoAddress
    ]>::witnesses();
    assert!(declared.contains(&Witness::of::<InvalidAddress>()));
    assert!(declared.contains(&Witness::of::<NoAddress>()));

    // The recovered address is first, so it can be shipped positionally.
    let reshipped = recovered | ship();
    assert_eq!(reshipped.arity(), 7);
    assert_eq!(
        reshipped.get::<Shipment, U0>().map(|s| s.to.state.as_str()),
        Some("CO")
    );
    assert_eq!(reshipped.get::<Shipment, U3>(), None);
}

#[test]
fn recovery_leaves_other_values_alone() {
    let shipped = ship_raw("CO");
    let recovered = shipped.pipe_any(recover());
    assert_eq!(recovered.index(), 2);
    assert!(recovered.get::<Shipment, _>().is_some());

    let unknown = ship_raw("Nevada").pipe_any(recover());
    assert_eq!(
        unknown.get::<UnknownState, _>(),
        Some(&UnknownState("Nevada".to_string()))
    );
}

#[test]
fn recovery_over_every_address_error() {
    let default_to_co = reify(|_: Sum![InvalidAddress, NoAddress]| Address {
        state: "CO".to_string(),
    });

    for raw in ["", "Atlantis"] {
        let recovered = ship_raw(raw).pipe_any(&default_to_co);
        assert_eq!(recovered.arity(), 5);
        assert_eq!(recovered.get::<Address, _>().map(|a| a.state.as_str()), Some("CO"));
    }

    let untouched = ship_raw("TX").pipe_any(&default_to_co);
    assert!(untouched.get::<Shipment, _>().is_some());
}

#[test]
fn dynamic_chain_agrees_with_static_chain() {
    let steps = [
        DynFn::new(reject_empty()),
        DynFn::new(validate()),
        DynFn::new(ship()),
    ];

    for raw in ["CO", "ColoraDo, the Sunny State", "", "AK"] {
        let mut carrier = DynSum::lift(raw.to_string());
        for step in &steps {
            carrier = carrier.pipe(step).unwrap();
        }
        assert_eq!(carrier.witnesses(), Shipped::witnesses());
        assert_eq!(carrier.held().map(|(i, _)| i), Some(ship_raw(raw).index()));
    }

    let carrier = DynSum::lift("Colorado".to_string())
        .pipe(&steps[0])
        .and_then(|c| c.pipe(&steps[1]))
        .and_then(|c| c.pipe(&steps[2]))
        .and_then(|c| c.pipe_any(&DynFn::new(recover())))
        .unwrap();
    assert_eq!(
        carrier.downcast_ref::<Address>().map(|a| a.state.as_str()),
        Some("CO")
    );

    let misplaced = DynSum::lift("CO".to_string()).pipe(&steps[2]).unwrap_err();
    assert!(misplaced.to_string().contains("Address"));
}
