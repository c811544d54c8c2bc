//! Fulfillment orchestrator
//!
//! Drives one processing cycle: fetch the eligible invoice queue, snapshot
//! the balance and deposit tables, then walk the invoices oldest-first and
//! settle each one into exactly one terminal outcome. Invoice processing is
//! strictly sequential, because a rebalance mutates the balance view that
//! later invoices in the same cycle must observe; the snapshot reads
//! themselves fan out in parallel inside the balance service.
//!
//! Failures are scoped tightly: a collaborator error while processing one
//! invoice yields a `Failed` outcome for that invoice only, and the cycle
//! moves on. Only a feed failure aborts the cycle, because without the queue
//! there is nothing to process.

use crate::balances::{has_enough_balance, BalanceService};
use crate::invoices::{order_invoices, resolve_asset};
use crate::selector::select_fill_source;
use filler_types::{
	AssetConfig, BalanceTable, BridgeExecutor, CycleReport, DepositTable, FeedError, FillOutcome,
	FillerConfig, IntentSubmitter, Invoice, InvoiceFeed,
};
use std::sync::Arc;
use tracing::{error, info, warn};
use uuid::Uuid;

/// Owns one processing cycle end to end
#[derive(Clone)]
pub struct FulfillmentService {
	config: Arc<FillerConfig>,
	balances: BalanceService,
	feed: Arc<dyn InvoiceFeed>,
	bridge: Arc<dyn BridgeExecutor>,
	submitter: Arc<dyn IntentSubmitter>,
}

impl FulfillmentService {
	pub fn new(
		config: Arc<FillerConfig>,
		balances: BalanceService,
		feed: Arc<dyn InvoiceFeed>,
		bridge: Arc<dyn BridgeExecutor>,
		submitter: Arc<dyn IntentSubmitter>,
	) -> Self {
		Self {
			config,
			balances,
			feed,
			bridge,
			submitter,
		}
	}

	/// Run one full processing cycle.
	///
	/// A `FeedError` aborts before any invoice is touched. Everything after
	/// that point is contained per invoice. Each cycle starts from freshly
	/// fetched tables, so a crashed cycle can simply be re-run.
	pub async fn run_cycle(&self) -> Result<CycleReport, FeedError> {
		let cycle_id = Uuid::new_v4().to_string();
		let invoices = self.feed.fetch_pending().await?;
		info!(cycle_id = %cycle_id, count = invoices.len(), "starting cycle");

		let mut balances = self.balances.aggregate_wallet_balances().await;
		let mut deposits = self.balances.aggregate_deposits().await;

		let mut outcomes = Vec::with_capacity(invoices.len());
		for invoice in order_invoices(invoices) {
			let outcome = self
				.process_invoice(&invoice, &mut balances, &mut deposits)
				.await;
			info!(
				cycle_id = %cycle_id,
				intent_id = %invoice.intent_id,
				outcome = %outcome,
				"invoice settled"
			);
			outcomes.push((invoice.intent_id, outcome));
		}

		Ok(CycleReport { cycle_id, outcomes })
	}

	/// Decide and execute one invoice's fate. Never propagates collaborator
	/// errors; they terminate as a `Failed` outcome for this invoice.
	async fn process_invoice(
		&self,
		invoice: &Invoice,
		balances: &mut BalanceTable,
		deposits: &mut DepositTable,
	) -> FillOutcome {
		// 1. Resolve the asset; an unknown ticker hash is terminal
		let Some(asset) = resolve_asset(&self.config, invoice) else {
			return FillOutcome::SkippedNoAsset;
		};
		let asset = asset.clone();

		// 2. Direct fill: first candidate destination with sufficient
		// wallet balance wins
		for destination in invoice.destination_chain_ids() {
			if has_enough_balance(balances, &asset.symbol, destination, &invoice.amount) {
				return match self.submit_fill(invoice, &asset, destination).await {
					Ok(()) => FillOutcome::Filled {
						chain: destination,
						rebalanced_from: None,
					},
					Err(reason) => FillOutcome::Failed { reason },
				};
			}
		}

		// 3. No destination is directly coverable; try to source liquidity
		// via a single rebalance toward the invoice's origin
		let Some(target_chain) = invoice.origin_chain_id() else {
			warn!(
				intent_id = %invoice.intent_id,
				origin = %invoice.origin,
				"invoice origin is not a chain id"
			);
			return FillOutcome::Failed {
				reason: format!("unparseable origin chain '{}'", invoice.origin),
			};
		};

		let Some(source_chain) = select_fill_source(
			deposits,
			&asset.symbol,
			&invoice.amount,
			self.config.settlement_chain_id,
		) else {
			info!(
				intent_id = %invoice.intent_id,
				asset = %asset.symbol,
				amount = %invoice.amount,
				"no chain holds sufficient deposits, skipping"
			);
			return FillOutcome::SkippedNoDestination;
		};

		match self
			.bridge
			.rebalance(&asset.symbol, source_chain, target_chain, &invoice.amount)
			.await
		{
			Ok(true) => {
				// The source chain's deposit just backed this rebalance and
				// the snapshot no longer reflects it. Drop the entry so later
				// invoices in this cycle cannot select the drained source.
				if let Some(chains) = deposits.get_mut(&asset.symbol) {
					chains.remove(&source_chain);
				}
			},
			Ok(false) => {
				info!(
					intent_id = %invoice.intent_id,
					source_chain,
					target_chain,
					"bridge declined rebalance, skipping invoice"
				);
				return FillOutcome::SkippedInsufficient;
			},
			Err(e) => {
				error!(
					intent_id = %invoice.intent_id,
					step = "rebalance",
					source_chain,
					target_chain,
					error = %e,
					"rebalance failed"
				);
				return FillOutcome::Failed {
					reason: format!("rebalance: {}", e),
				};
			},
		}

		// The pre-rebalance snapshot is stale for the target chain now;
		// re-read that one entry from source before the retry check
		self.balances
			.refresh_wallet_entry(balances, &asset.symbol, target_chain)
			.await;

		if !has_enough_balance(balances, &asset.symbol, target_chain, &invoice.amount) {
			warn!(
				intent_id = %invoice.intent_id,
				chain_id = target_chain,
				"balance still insufficient after rebalance, skipping"
			);
			return FillOutcome::SkippedInsufficient;
		}

		match self.submit_fill(invoice, &asset, target_chain).await {
			Ok(()) => FillOutcome::Filled {
				chain: target_chain,
				rebalanced_from: Some(source_chain),
			},
			Err(reason) => FillOutcome::Failed { reason },
		}
	}

	/// Submit the fill sourced from `origin_chain`, mapping every failure
	/// into a loggable reason
	async fn submit_fill(
		&self,
		invoice: &Invoice,
		asset: &AssetConfig,
		origin_chain: u64,
	) -> Result<(), String> {
		let chain_asset = self
			.config
			.chain_asset(&asset.symbol, origin_chain)
			.map_err(|e| {
				error!(
					intent_id = %invoice.intent_id,
					step = "submit_fill",
					error = %e,
					"descriptor lookup failed"
				);
				e.to_string()
			})?;

		self.submitter
			.submit_fill(
				origin_chain,
				&invoice.destinations,
				&self.config.beneficiary,
				&chain_asset.address,
				&invoice.amount,
				&self.config.max_fee,
			)
			.await
			.map(|receipt| {
				info!(
					intent_id = %invoice.intent_id,
					chain_id = origin_chain,
					fill_intent = receipt.intent_id.as_deref().unwrap_or("unknown"),
					"fill submitted"
				);
			})
			.map_err(|e| {
				error!(
					intent_id = %invoice.intent_id,
					step = "submit_fill",
					chain_id = origin_chain,
					error = %e,
					"fill submission failed"
				);
				format!("submit fill: {}", e)
			})
	}
}
