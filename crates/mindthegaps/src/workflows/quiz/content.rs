use super::super::pillar::Pillar;
use super::domain::CostOfLeak;

pub(crate) fn primary_narrative(pillar: Pillar, baseline_score: u8) -> String {
    format!(
        "Your primary growth gap is {}: {} Your answers put this gap at {}/100.",
        pillar.label(),
        pillar_summary(pillar),
        baseline_score
    )
}

fn pillar_summary(pillar: Pillar) -> &'static str {
    match pillar {
        Pillar::Acquisition => "not enough of the right people are finding you and reaching out.",
        Pillar::Conversion => {
            "people are reaching out, but too few of them turn into paying customers."
        }
        Pillar::Retention => {
            "customers buy, but too few come back, rebook, or send others your way."
        }
    }
}

pub(crate) fn cost_of_leak(pillar: Pillar) -> CostOfLeak {
    match pillar {
        Pillar::Acquisition => CostOfLeak {
            narrative: "Every slow month in the pipeline is revenue you can't recover later; \
                        a thin or single-channel lead flow makes each lost source hurt twice.",
            advice: "Pick one warm channel you can work every week and measure leads per week \
                     before adding anything new.",
        },
        Pillar::Conversion => CostOfLeak {
            narrative: "You already paid to get these leads. Each one that goes quiet is \
                        marketing spend that produced nothing.",
            advice: "Give one person ownership of every new inquiry and a same-day response \
                     target before spending more on leads.",
        },
        Pillar::Retention => CostOfLeak {
            narrative: "A past customer is the cheapest sale you will ever make. When they \
                        don't come back, you pay to replace them with a stranger.",
            advice: "Put the next visit, check-in, or referral ask on the calendar before \
                     the current job is closed out.",
        },
    }
}

pub(crate) fn next_steps(pillar: Pillar) -> [&'static str; 2] {
    match pillar {
        Pillar::Acquisition => [
            "Confirm where your last 20 leads actually came from",
            "Choose one secondary channel to build over the next 30 days",
        ],
        Pillar::Conversion => [
            "Time your response to the next 10 inquiries",
            "Map every step between first contact and a booked job",
        ],
        Pillar::Retention => [
            "List customers who haven't returned in the last 6 months",
            "Script one follow-up touch for the week after each job",
        ],
    }
}
