//! Posts variables and constraints for a problem instance.

use std::collections::HashMap;

use mixdispatch_core::{ProblemInstance, UNREACHABLE};

use super::{DispatchModel, OrderVars, SlotVars};
use crate::fd::propagators::{
    AllDifferent, AndReif, ConditionalSum, Disjunctive, ElementConst, ElementVar, HorizonCap,
    LinearLe, ReifiedEq, ReifiedGe, Task,
};
use crate::fd::{ConstraintNetwork, Domain, Lit, VarId};

/// Upper bound of the cost variable.
pub const COST_CAP: i64 = 1 << 40;

pub(super) struct ModelBuilder<'a> {
    instance: &'a ProblemInstance,
    net: ConstraintNetwork,
    constants: HashMap<i64, VarId>,
    num_orders: usize,
    num_vehicles: usize,
    num_stations: usize,
    slots_per_vehicle: usize,
    max_per_order: usize,
    horizon: i64,
}

/// Per-order lookup tables extended with a zero row for the null order.
struct Tables {
    start: Vec<i64>,
    setup: Vec<i64>,
    rate: Vec<i64>,
    loading: Vec<i64>,
    travel_to: Vec<i64>,
    travel_from: Vec<i64>,
    off_preferred: Vec<i64>,
}

impl<'a> ModelBuilder<'a> {
    pub(super) fn new(instance: &'a ProblemInstance) -> Self {
        let bounds = instance.bounds();
        Self {
            instance,
            net: ConstraintNetwork::new(),
            constants: HashMap::new(),
            num_orders: instance.num_orders(),
            num_vehicles: instance.num_vehicles(),
            num_stations: instance.num_stations(),
            slots_per_vehicle: instance.slots_per_vehicle(),
            max_per_order: bounds.max_deliveries_per_order,
            horizon: bounds.max_time_stamp,
        }
    }

    pub(super) fn build(mut self) -> DispatchModel {
        let tables = self.tables();
        let last_slot = self.slots_per_vehicle as i64 - 1;
        let deliveries: Vec<VarId> = (0..self.num_vehicles)
            .map(|_| self.var(0, last_slot.max(0)))
            .collect();

        let slots = self.post_slots(&deliveries, &tables);
        self.post_continuity(&slots, &tables);
        self.post_station_exclusion(&slots);
        self.post_yard_exclusion(&slots);
        let orders = self.post_orders(&slots, &deliveries);
        let cost = self.post_cost(&slots, &orders);

        DispatchModel {
            network: self.net,
            deliveries,
            slots,
            orders,
            cost,
            slots_per_vehicle: self.slots_per_vehicle,
            null_order: self.num_orders as i64,
            horizon: self.horizon,
        }
    }

    fn tables(&self) -> Tables {
        let inst = self.instance;
        let (orders, stations) = (self.num_orders, self.num_stations);
        let with_null = |f: &dyn Fn(usize) -> i64| {
            (0..orders).map(f).chain(std::iter::once(0)).collect::<Vec<_>>()
        };
        let per_station = |f: &dyn Fn(usize, usize) -> i64| {
            let mut table = vec![0; (orders + 1) * stations];
            for o in 0..orders {
                for s in 0..stations {
                    table[o * stations + s] = f(o, s);
                }
            }
            table
        };

        Tables {
            start: with_null(&|o| inst.start_time(o)),
            setup: with_null(&|o| inst.orders()[o].setup_time),
            rate: with_null(&|o| inst.orders()[o].discharge_rate),
            loading: (0..stations).map(|s| inst.loading_time(s)).collect(),
            travel_to: per_station(&|o, s| inst.travel_to_yard(o, s)),
            travel_from: per_station(&|o, s| inst.travel_from_yard(o, s)),
            off_preferred: per_station(&|o, s| {
                inst.orders()[o]
                    .preferred_station
                    .is_some_and(|p| p != s) as i64
            }),
        }
    }

    fn var(&mut self, lo: i64, hi: i64) -> VarId {
        self.net.new_var(Domain::range(lo, hi))
    }

    fn constant(&mut self, value: i64) -> VarId {
        let net = &mut self.net;
        *self
            .constants
            .entry(value)
            .or_insert_with(|| net.new_var(Domain::singleton(value)))
    }

    fn le(&mut self, terms: Vec<(i64, VarId)>, rhs: i64, guard: Option<Lit>) {
        let mut p = LinearLe::new(terms, rhs);
        if let Some(g) = guard {
            p = p.guarded(g);
        }
        self.net.post(p);
    }

    fn eq(&mut self, terms: Vec<(i64, VarId)>, rhs: i64, guard: Option<Lit>) {
        for p in LinearLe::equality(terms, rhs, guard) {
            self.net.post(p);
        }
    }

    /// `table[index]` as a new variable.
    fn element(&mut self, index: VarId, table: &[i64]) -> VarId {
        let lo = table.iter().copied().min().unwrap_or(0);
        let hi = table.iter().copied().max().unwrap_or(0);
        let result = self.var(lo, hi);
        self.net.post(ElementConst::new(index, table.to_vec(), result));
        result
    }

    fn post_slots(&mut self, deliveries: &[VarId], t: &Tables) -> Vec<SlotVars> {
        let inst = self.instance;
        let null = self.num_orders as i64;
        let stride = self.num_stations as i64;
        let max_loading = t.loading.iter().copied().max().unwrap_or(0);
        let max_travel_from = t.travel_from.iter().copied().max().unwrap_or(0);
        let routable = Domain::from_values(
            (0..t.travel_to.len())
                .filter(|&p| t.travel_to[p] < UNREACHABLE)
                .map(|p| p as i64),
        );
        let mut slots = Vec::with_capacity(self.num_vehicles * self.slots_per_vehicle);

        for (v, &count) in deliveries.iter().enumerate() {
            let volumes: Vec<i64> = (0..self.num_orders)
                .map(|o| inst.deliverable_volume(o, v))
                .chain(std::iter::once(0))
                .collect();
            let durations: Vec<i64> = (0..self.num_orders)
                .map(|o| inst.unload_duration(o, v))
                .chain(std::iter::once(0))
                .collect();
            let servable = Domain::from_values(
                (0..self.num_orders)
                    .filter(|&o| inst.is_compatible(o, v))
                    .map(|o| o as i64)
                    .chain(std::iter::once(null)),
            );

            for d in 0..self.slots_per_vehicle {
                let used = self.net.new_bool();
                self.net.post(ReifiedGe::new(used, count, d as i64 + 1));

                let order = self.net.new_var(servable.clone());
                let station = if d == 0 {
                    self.var(0, 0)
                } else {
                    self.var(0, stride - 1)
                };
                let load = self.var(0, self.horizon);
                let unload = self.var(0, self.horizon);

                // unused slots take the null assignment
                let is_null = self.net.new_bool();
                self.net.post(ReifiedEq::new(is_null, order, null));
                self.eq(vec![(1, used), (1, is_null)], 1, None);
                for x in [station, load, unload] {
                    self.le(vec![(1, x)], 0, Some(Lit::neg(used)));
                }

                // flattened (order, station) pair for the travel tables
                let pair = self.net.new_var(routable.clone());
                self.eq(vec![(1, pair), (-stride, order), (-1, station)], 0, None);
                let travel_to = self.element(pair, &t.travel_to);
                let loading = self.element(station, &t.loading);

                let arrival = self.var(0, self.horizon + max_loading);
                self.eq(
                    vec![(1, arrival), (-1, load), (-1, loading), (-1, travel_to)],
                    0,
                    None,
                );
                let setup = self.element(order, &t.setup);
                self.le(
                    vec![(1, arrival), (1, setup), (-1, unload)],
                    0,
                    Some(Lit::pos(used)),
                );

                let start = self.element(order, &t.start);
                self.le(vec![(1, start), (-1, unload)], 0, None);

                if d == 0 {
                    self.le(
                        vec![(-1, load)],
                        -inst.available_from(v),
                        Some(Lit::pos(used)),
                    );
                }

                let volume = self.element(order, &volumes);
                let duration = self.element(order, &durations);
                let rate = self.element(order, &t.rate);
                let max_volume = volumes.iter().copied().max().unwrap_or(0);
                let poured = self.var(0, max_volume);
                self.net
                    .post(HorizonCap::new(poured, volume, rate, unload, self.horizon));

                let off_preferred = self.element(pair, &t.off_preferred);
                let travel_from = self.var(0, max_travel_from);

                slots.push(SlotVars {
                    vehicle: v,
                    index: d,
                    used,
                    order,
                    station,
                    load,
                    unload,
                    arrival,
                    travel_to,
                    travel_from,
                    volume,
                    duration,
                    poured,
                    off_preferred,
                });
            }
        }
        slots
    }

    /// Travel back to the next slot's station, and no overlap along a route.
    fn post_continuity(&mut self, slots: &[SlotVars], t: &Tables) {
        let k = self.slots_per_vehicle;
        let stride = self.num_stations as i64;
        let pairs = (self.num_orders as i64 + 1) * stride;

        for (i, slot) in slots.iter().enumerate() {
            if slot.index + 1 == k {
                self.le(vec![(1, slot.travel_from)], 0, None);
            } else {
                // an unused next slot sits at the depot
                let next = &slots[i + 1];
                let pair = self.var(0, pairs - 1);
                self.eq(
                    vec![(1, pair), (-stride, slot.order), (-1, next.station)],
                    0,
                    None,
                );
                let back = self.element(pair, &t.travel_from);
                self.eq(
                    vec![(1, slot.travel_from), (-1, back)],
                    0,
                    Some(Lit::pos(slot.used)),
                );
                self.le(vec![(1, slot.travel_from)], 0, Some(Lit::neg(slot.used)));
            }

            if slot.index > 0 {
                let prev = &slots[i - 1];
                self.le(
                    vec![
                        (1, prev.unload),
                        (1, prev.duration),
                        (1, prev.travel_from),
                        (-1, slot.load),
                    ],
                    0,
                    Some(Lit::pos(slot.used)),
                );
            }
        }
    }

    fn post_station_exclusion(&mut self, slots: &[SlotVars]) {
        for st in 0..self.num_stations {
            let loading = self.instance.loading_time(st);
            if loading <= 0 {
                continue;
            }
            let duration = self.constant(loading);
            let mut tasks = Vec::with_capacity(slots.len());
            for slot in slots {
                let here = self.net.new_bool();
                self.net.post(ReifiedEq::new(here, slot.station, st as i64));
                let presence = self.net.new_bool();
                self.net.post(AndReif::new(presence, slot.used, here));
                tasks.push(Task {
                    start: slot.load,
                    duration,
                    presence,
                });
            }
            self.net.post(Disjunctive::new(tasks));
        }
    }

    fn post_yard_exclusion(&mut self, slots: &[SlotVars]) {
        for o in 0..self.num_orders {
            let mut tasks = Vec::with_capacity(slots.len());
            for slot in slots {
                let presence = self.net.new_bool();
                self.net.post(ReifiedEq::new(presence, slot.order, o as i64));
                tasks.push(Task {
                    start: slot.unload,
                    duration: slot.duration,
                    presence,
                });
            }
            self.net.post(Disjunctive::new(tasks));
        }
    }

    fn post_orders(&mut self, slots: &[SlotVars], deliveries: &[VarId]) -> Vec<OrderVars> {
        let n = slots.len() as i64;
        let per_order = self.max_per_order;
        let selectors: Vec<VarId> = slots.iter().map(|s| s.order).collect();
        let pours: Vec<VarId> = slots.iter().map(|s| s.poured).collect();
        let max_total: i64 = slots
            .iter()
            .map(|s| self.net.store().max(s.poured))
            .sum();
        let max_duration = slots
            .iter()
            .map(|s| self.net.store().max(s.duration))
            .max()
            .unwrap_or(0);

        let one = self.constant(1);
        let zero = self.constant(0);

        // sequence position p of order o maps into slots, or onto its dummy n + p
        let mut ext_order = selectors.clone();
        let mut ext_unload: Vec<VarId> = slots.iter().map(|s| s.unload).collect();
        let mut ext_duration: Vec<VarId> = slots.iter().map(|s| s.duration).collect();
        for o in 0..self.num_orders {
            let id = self.constant(o as i64);
            for _ in 0..per_order {
                ext_order.push(id);
                ext_unload.push(zero);
                ext_duration.push(zero);
            }
        }

        let mut orders = Vec::with_capacity(self.num_orders);
        let mut all_positions = Vec::new();
        let mut counts = Vec::with_capacity(self.num_orders);

        for o in 0..self.num_orders {
            let volume = self.instance.orders()[o].total_volume;
            let count = self.var(0, per_order as i64);
            self.net.post(ConditionalSum::new(
                selectors.clone(),
                vec![one; slots.len()],
                o as i64,
                count,
            ));
            counts.push(count);

            let total_poured = self.var(volume, max_total);
            self.net.post(ConditionalSum::new(
                selectors.clone(),
                pours.clone(),
                o as i64,
                total_poured,
            ));
            let waste = self.var(0, max_total);
            self.eq(vec![(1, waste), (-1, total_poured)], -volume, None);

            let id = self.constant(o as i64);
            let mut sequence = Vec::with_capacity(per_order);
            let mut position_used = Vec::with_capacity(per_order);
            let mut unload = Vec::with_capacity(per_order);
            let mut durations = Vec::with_capacity(per_order);
            for j in 0..per_order {
                let dummy = n + (o * per_order + j) as i64;
                let mut domain = Domain::range(0, dummy);
                domain.remove_range(n, dummy - 1);
                let seq = self.net.new_var(domain);

                let active = self.net.new_bool();
                self.net.post(ReifiedGe::new(active, count, j as i64 + 1));
                self.le(vec![(1, seq)], n - 1, Some(Lit::pos(active)));
                self.le(vec![(-1, seq)], -n, Some(Lit::neg(active)));

                self.net.post(ElementVar::new(seq, ext_order.clone(), id));
                let u = self.var(0, self.horizon);
                self.net.post(ElementVar::new(seq, ext_unload.clone(), u));
                let du = self.var(0, max_duration);
                self.net.post(ElementVar::new(seq, ext_duration.clone(), du));

                if j > 0 {
                    self.le(
                        vec![(1, unload[j - 1]), (1, durations[j - 1]), (-1, u)],
                        0,
                        Some(Lit::pos(active)),
                    );
                }

                sequence.push(seq);
                position_used.push(active);
                unload.push(u);
                durations.push(du);
            }
            all_positions.extend(sequence.iter().copied());

            let start = self.instance.start_time(o);
            let lateness = self.var(0, self.horizon);
            self.eq(
                vec![(1, lateness), (-1, unload[0])],
                -start,
                Some(Lit::pos(position_used[0])),
            );
            self.le(vec![(1, lateness)], 0, Some(Lit::neg(position_used[0])));

            let mut lag = vec![zero];
            for j in 1..per_order {
                let gap = self.var(0, self.horizon);
                self.eq(
                    vec![
                        (1, gap),
                        (-1, unload[j]),
                        (1, unload[j - 1]),
                        (1, durations[j - 1]),
                    ],
                    0,
                    Some(Lit::pos(position_used[j])),
                );
                self.le(vec![(1, gap)], 0, Some(Lit::neg(position_used[j])));
                lag.push(gap);
            }

            orders.push(OrderVars {
                count,
                total_poured,
                waste,
                lateness,
                sequence,
                position_used,
                unload,
                lag,
            });
        }

        if !all_positions.is_empty() {
            self.net.post(AllDifferent::new(all_positions));
        }

        // every used slot is counted by exactly one order
        let mut implied: Vec<(i64, VarId)> = counts.iter().map(|&c| (1, c)).collect();
        implied.extend(deliveries.iter().map(|&d| (-1, d)));
        self.eq(implied, 0, None);

        orders
    }

    fn post_cost(&mut self, slots: &[SlotVars], orders: &[OrderVars]) -> VarId {
        let w = *self.instance.weights();
        let mut terms = Vec::new();
        for order in orders {
            terms.push((w.lateness, order.lateness));
            terms.push((w.waste, order.waste));
            terms.extend(order.lag.iter().skip(1).map(|&l| (w.lag, l)));
        }
        for slot in slots {
            terms.push((w.off_preferred, slot.off_preferred));
            terms.push((w.travel, slot.travel_to));
            terms.push((w.travel, slot.travel_from));
        }
        let cost = self.var(0, COST_CAP);
        terms.push((-1, cost));
        self.eq(terms, 0, None);
        cost
    }
}
